//! Maintainer lookup for a package.
//!
//! An owner search returns the owners registered for a package and for the
//! project containing it. Owners can be people or groups; groups are expanded
//! into their members with one request per group, and the group requests of an
//! owner record run concurrently.

use crate::core::group::fetch_group;
use crate::core::{PackageRef, Transport};
use crate::domain::document::XmlDocument;
use crate::domain::model::{Owner, OwnerCollection, PackageMaintainers, Person, PersonRole};
use crate::utils::error::Result;
use crate::utils::validation::validate_entity_name;
use futures::future::try_join_all;
use reqwest::Method;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Only owners holding one of these roles are returned by the service.
    pub roles: Vec<PersonRole>,
    /// Groups that are never expanded, e.g. `factory-maintainers`, who co-own
    /// every package in `openSUSE:Factory`.
    pub groups_to_ignore: Vec<String>,
}

impl SearchOptions {
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = PersonRole>) -> Self {
        self.roles.extend(roles);
        self
    }

    pub fn ignore_group(mut self, name: impl Into<String>) -> Self {
        self.groups_to_ignore.push(name.into());
        self
    }

    fn is_ignored(&self, group: &str) -> bool {
        self.groups_to_ignore.iter().any(|ignored| ignored == group)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Package,
    Project,
}

/// Owners of the queried package are package scope, owners without a package
/// are project scope. Records for some other package are not ours.
fn classify(owner: &Owner, package_name: &str) -> Option<Scope> {
    owner.project.as_deref().filter(|p| !p.is_empty())?;

    match owner.package.as_deref() {
        Some(package) if package == package_name => Some(Scope::Package),
        None | Some("") => Some(Scope::Project),
        Some(_) => None,
    }
}

async fn expand_groups<T: Transport + ?Sized>(
    transport: &T,
    owner: &Owner,
    options: &SearchOptions,
) -> Result<Vec<Person>> {
    let fetches = owner
        .group
        .iter()
        .filter(|group| {
            let ignored = options.is_ignored(&group.name);
            if ignored {
                tracing::debug!("Not expanding ignored group {}", group.name);
            }
            !ignored
        })
        .map(|group| fetch_group(transport, &group.name));

    let groups = try_join_all(fetches).await?;

    Ok(groups.iter().flat_map(|group| group.members()).collect())
}

fn dedup_by_userid(persons: Vec<Person>) -> Vec<Person> {
    let mut seen = HashSet::new();
    persons
        .into_iter()
        .filter(|person| seen.insert(person.userid.clone()))
        .collect()
}

/// Finds the maintainers of a package, given as a record or by name.
///
/// Members of the owning groups are included unless the group is listed in
/// [`SearchOptions::groups_to_ignore`]. Each scope is free of duplicate user
/// ids; the order of the lists carries no meaning.
pub async fn search_for_maintainers<T: Transport + ?Sized>(
    transport: &T,
    package: PackageRef<'_>,
    options: &SearchOptions,
) -> Result<PackageMaintainers> {
    let package_name = package.name();
    validate_entity_name("package", package_name)?;

    let filter = options
        .roles
        .iter()
        .map(PersonRole::as_str)
        .collect::<Vec<_>>()
        .join(",");

    let mut params = vec![("package", package_name)];
    if !filter.is_empty() {
        params.push(("filter", filter.as_str()));
    }

    tracing::debug!("Searching owners of {} (filter: {:?})", package_name, filter);
    let body = transport
        .api_request("/search/owner", Method::GET, &params, None)
        .await?;
    let owners = OwnerCollection::from_document(&body)?;

    let mut package_scope = Vec::new();
    let mut project_scope = Vec::new();

    for owner in &owners.owner {
        let Some(scope) = classify(owner, package_name) else {
            tracing::debug!(
                "Skipping owner record for {:?}/{:?}",
                owner.project,
                owner.package
            );
            continue;
        };

        let group_members = expand_groups(transport, owner, options).await?;

        let target = match scope {
            Scope::Package => &mut package_scope,
            Scope::Project => &mut project_scope,
        };
        target.extend(owner.person.iter().cloned());
        target.extend(group_members);
    }

    let maintainers = PackageMaintainers {
        package: dedup_by_userid(package_scope),
        project: dedup_by_userid(project_scope),
    };

    tracing::info!(
        "Found {} package and {} project maintainers for {}",
        maintainers.package.len(),
        maintainers.project.len(),
        package_name
    );

    Ok(maintainers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::FakeTransport;
    use crate::domain::model::{GroupRef, Package};
    use crate::utils::error::ErrorCategory;
    use std::time::Duration;

    fn owner(project: Option<&str>, package: Option<&str>) -> Owner {
        Owner {
            rootproject: None,
            project: project.map(str::to_string),
            package: package.map(str::to_string),
            person: Vec::new(),
            group: Vec::new(),
        }
    }

    fn userids(persons: &[Person]) -> Vec<&str> {
        let mut ids: Vec<&str> = persons.iter().map(|p| p.userid.as_str()).collect();
        ids.sort();
        ids
    }

    fn group_doc(name: &str, maintainers: &[&str], members: &[&str]) -> String {
        let maintainers: String = maintainers
            .iter()
            .map(|m| format!(r#"<maintainer userid="{}"/>"#, m))
            .collect();
        let members: String = members
            .iter()
            .map(|m| format!(r#"<person userid="{}"/>"#, m))
            .collect();
        format!(
            "<group><title>{}</title>{}<person>{}</person></group>",
            name, maintainers, members
        )
    }

    #[test]
    fn test_classify_owner_records() {
        assert_eq!(
            classify(&owner(Some("home:x"), Some("pkgA")), "pkgA"),
            Some(Scope::Package)
        );
        assert_eq!(
            classify(&owner(Some("home:x"), None), "pkgA"),
            Some(Scope::Project)
        );
        assert_eq!(
            classify(&owner(Some("home:x"), Some("")), "pkgA"),
            Some(Scope::Project)
        );
        assert_eq!(classify(&owner(Some("home:x"), Some("pkgB")), "pkgA"), None);
        assert_eq!(classify(&owner(None, Some("pkgA")), "pkgA"), None);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let persons = vec![
            Person::with_role("alice", PersonRole::Maintainer),
            Person::new("bob"),
            Person::new("alice"),
        ];
        let deduped = dedup_by_userid(persons);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].role, Some(PersonRole::Maintainer));
    }

    #[tokio::test]
    async fn test_package_owner_with_group() {
        let transport = FakeTransport::new()
            .reply(
                Method::GET,
                "/search/owner",
                r#"<collection>
  <owner project="home:x" package="pkgA">
    <person name="alice" role="maintainer"/>
    <group name="grp1" role="maintainer"/>
  </owner>
</collection>"#,
            )
            .reply(Method::GET, "/group/grp1", &group_doc("grp1", &["bob"], &[]));

        let pkg = Package::new("pkgA", "Package A");
        let result = search_for_maintainers(&transport, (&pkg).into(), &SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(userids(&result.package), vec!["alice", "bob"]);
        assert!(result.project.is_empty());

        let calls = transport.calls().await;
        assert_eq!(
            calls[0].params,
            vec![("package".to_string(), "pkgA".to_string())]
        );
    }

    #[tokio::test]
    async fn test_scopes_are_deduplicated_independently() {
        let transport = FakeTransport::new()
            .reply(
                Method::GET,
                "/search/owner",
                r#"<collection>
  <owner project="devel:tools" package="gcc">
    <person name="alice" role="maintainer"/>
    <person name="alice" role="bugowner"/>
    <group name="tools"/>
  </owner>
  <owner project="devel:tools">
    <person name="alice" role="maintainer"/>
    <group name="tools"/>
  </owner>
  <owner project="devel:other" package="gcc-other">
    <person name="mallory" role="maintainer"/>
  </owner>
</collection>"#,
            )
            .reply(
                Method::GET,
                "/group/tools",
                &group_doc("tools", &["bob"], &["alice", "carol"]),
            );

        let result = search_for_maintainers(&transport, "gcc".into(), &SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(userids(&result.package), vec!["alice", "bob", "carol"]);
        assert_eq!(userids(&result.project), vec!["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn test_ignored_groups_are_not_fetched() {
        let transport = FakeTransport::new()
            .reply(
                Method::GET,
                "/search/owner",
                r#"<collection>
  <owner project="openSUSE:Factory">
    <group name="factory-maintainers"/>
    <group name="grp1"/>
  </owner>
</collection>"#,
            )
            .reply(Method::GET, "/group/grp1", &group_doc("grp1", &[], &["dave"]))
            .reply(
                Method::GET,
                "/group/factory-maintainers",
                &group_doc("factory-maintainers", &["eve"], &["frank"]),
            );

        let options = SearchOptions::default().ignore_group("factory-maintainers");
        let result = search_for_maintainers(&transport, "gcc".into(), &options)
            .await
            .unwrap();

        assert!(result.package.is_empty());
        assert_eq!(userids(&result.project), vec!["dave"]);
        assert!(transport
            .calls()
            .await
            .iter()
            .all(|call| call.route != "/group/factory-maintainers"));
    }

    #[tokio::test]
    async fn test_role_filter_is_comma_joined() {
        let transport =
            FakeTransport::new().reply(Method::GET, "/search/owner", "<collection/>");

        let options = SearchOptions::default()
            .with_roles([PersonRole::Maintainer, PersonRole::Bugowner]);
        let result = search_for_maintainers(&transport, "gcc".into(), &options)
            .await
            .unwrap();

        assert_eq!(result, PackageMaintainers::default());
        let calls = transport.calls().await;
        assert_eq!(
            calls[0].params,
            vec![
                ("package".to_string(), "gcc".to_string()),
                ("filter".to_string(), "maintainer,bugowner".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_group_fetch_failure_fails_search() {
        let transport = FakeTransport::new()
            .reply(
                Method::GET,
                "/search/owner",
                r#"<collection>
  <owner project="home:x" package="pkgA"><person name="alice"/></owner>
  <owner project="home:x"><group name="grp1"/><group name="gone"/></owner>
</collection>"#,
            )
            .reply(Method::GET, "/group/grp1", &group_doc("grp1", &["bob"], &[]));

        let err = search_for_maintainers(&transport, "pkgA".into(), &SearchOptions::default())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_group_fetches_of_one_owner_run_concurrently() {
        let transport = FakeTransport::new()
            .with_delay(Duration::from_millis(20))
            .reply(
                Method::GET,
                "/search/owner",
                r#"<collection>
  <owner project="home:x" package="pkgA">
    <group name="g1"/><group name="g2"/><group name="g3"/>
  </owner>
</collection>"#,
            )
            .reply(Method::GET, "/group/g1", &group_doc("g1", &["a"], &[]))
            .reply(Method::GET, "/group/g2", &group_doc("g2", &["b"], &[]))
            .reply(Method::GET, "/group/g3", &group_doc("g3", &["c"], &[]));

        let result = search_for_maintainers(&transport, "pkgA".into(), &SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(userids(&result.package), vec!["a", "b", "c"]);
        assert_eq!(transport.max_in_flight(), 3);
    }

    #[tokio::test]
    async fn test_empty_package_name_fails_before_request() {
        let transport = FakeTransport::new();
        let err = search_for_maintainers(&transport, "".into(), &SearchOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Usage);
        assert!(transport.calls().await.is_empty());
    }

    #[test]
    fn test_group_ref_is_matched_by_name() {
        let options = SearchOptions::default().ignore_group("grp1");
        let grp = GroupRef {
            name: "grp1".to_string(),
            role: None,
        };
        assert!(options.is_ignored(&grp.name));
        assert!(!options.is_ignored("grp2"));
    }
}
