use crate::domain::document::XmlDocument;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PersonRole {
    Maintainer,
    Bugowner,
    Reviewer,
    Downloader,
    Reader,
    /// Any role this client does not know about.
    #[serde(other)]
    #[cfg_attr(feature = "cli", value(skip))]
    Unknown,
}

impl PersonRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonRole::Maintainer => "maintainer",
            PersonRole::Bugowner => "bugowner",
            PersonRole::Reviewer => "reviewer",
            PersonRole::Downloader => "downloader",
            PersonRole::Reader => "reader",
            PersonRole::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user, optionally with the role they hold on a project or package.
///
/// Project meta and group documents spell the id `userid`, owner search results
/// spell it `name`; both parse into this type. Equality and hashing only look
/// at `userid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "@userid", alias = "@name")]
    pub userid: String,
    #[serde(rename = "@role", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PersonRole>,
}

impl Person {
    pub fn new(userid: impl Into<String>) -> Self {
        Self {
            userid: userid.into(),
            role: None,
        }
    }

    pub fn with_role(userid: impl Into<String>, role: PersonRole) -> Self {
        Self {
            userid: userid.into(),
            role: Some(role),
        }
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.userid == other.userid
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.userid.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    #[serde(rename = "@project")]
    pub project: String,
    #[serde(rename = "@repository")]
    pub repository: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "path", default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathEntry>,
    #[serde(rename = "arch", default, skip_serializing_if = "Vec::is_empty")]
    pub arch: Vec<String>,
}

impl Repository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Vec::new(),
            arch: Vec::new(),
        }
    }

    pub fn with_path(mut self, project: impl Into<String>, repository: impl Into<String>) -> Self {
        self.path.push(PathEntry {
            project: project.into(),
            repository: repository.into(),
        });
        self
    }

    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch.push(arch.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "person", default, skip_serializing_if = "Vec::is_empty")]
    pub person: Vec<Person>,
    #[serde(rename = "repository", default, skip_serializing_if = "Vec::is_empty")]
    pub repository: Vec<Repository>,
}

impl Project {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: String::new(),
            person: Vec::new(),
            repository: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_person(mut self, person: Person) -> Self {
        self.person.push(person);
        self
    }

    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repository.push(repository);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scmsync: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: String::new(),
            scmsync: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_scmsync(mut self, url: impl Into<String>) -> Self {
        self.scmsync = Some(url.into());
        self
    }
}

/// Either a full project record or just its name.
#[derive(Debug, Clone, Copy)]
pub enum ProjectRef<'a> {
    Record(&'a Project),
    Name(&'a str),
}

impl<'a> ProjectRef<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            ProjectRef::Record(project) => &project.name,
            ProjectRef::Name(name) => name,
        }
    }
}

impl<'a> From<&'a Project> for ProjectRef<'a> {
    fn from(project: &'a Project) -> Self {
        ProjectRef::Record(project)
    }
}

impl<'a> From<&'a str> for ProjectRef<'a> {
    fn from(name: &'a str) -> Self {
        ProjectRef::Name(name)
    }
}

impl<'a> From<&'a String> for ProjectRef<'a> {
    fn from(name: &'a String) -> Self {
        ProjectRef::Name(name.as_str())
    }
}

/// Either a full package record or just its name.
#[derive(Debug, Clone, Copy)]
pub enum PackageRef<'a> {
    Record(&'a Package),
    Name(&'a str),
}

impl<'a> PackageRef<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            PackageRef::Record(package) => &package.name,
            PackageRef::Name(name) => name,
        }
    }
}

impl<'a> From<&'a Package> for PackageRef<'a> {
    fn from(package: &'a Package) -> Self {
        PackageRef::Record(package)
    }
}

impl<'a> From<&'a str> for PackageRef<'a> {
    fn from(name: &'a str) -> Self {
        PackageRef::Name(name)
    }
}

impl<'a> From<&'a String> for PackageRef<'a> {
    fn from(name: &'a String) -> Self {
        PackageRef::Name(name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembers {
    #[serde(rename = "person", default, skip_serializing_if = "Vec::is_empty")]
    pub person: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    /// The group name.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "maintainer", default, skip_serializing_if = "Vec::is_empty")]
    pub maintainer: Vec<Person>,
    #[serde(default)]
    pub person: GroupMembers,
}

impl UserGroup {
    /// Group maintainers followed by plain members, without their roles.
    pub fn members(&self) -> impl Iterator<Item = Person> + '_ {
        self.maintainer
            .iter()
            .chain(self.person.person.iter())
            .map(|p| Person::new(p.userid.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@role", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PersonRole>,
}

/// One hit of an owner search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(rename = "@rootproject", default, skip_serializing_if = "Option::is_none")]
    pub rootproject: Option<String>,
    #[serde(rename = "@project", default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(rename = "@package", default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(rename = "person", default, skip_serializing_if = "Vec::is_empty")]
    pub person: Vec<Person>,
    #[serde(rename = "group", default, skip_serializing_if = "Vec::is_empty")]
    pub group: Vec<GroupRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerCollection {
    #[serde(rename = "owner", default, skip_serializing_if = "Vec::is_empty")]
    pub owner: Vec<Owner>,
}

/// Maintainers of a package, split by the scope they were registered for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageMaintainers {
    pub package: Vec<Person>,
    pub project: Vec<Person>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@md5", default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(rename = "@size", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(rename = "@mtime", default, skip_serializing_if = "Option::is_none")]
    pub mtime: Option<i64>,
    #[serde(rename = "@originproject", default, skip_serializing_if = "Option::is_none")]
    pub originproject: Option<String>,
    #[serde(rename = "@available", default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(rename = "@recommended", default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
    #[serde(rename = "@hash", default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    #[serde(rename = "@project", default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(rename = "@package", default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(rename = "@srcmd5", default, skip_serializing_if = "Option::is_none")]
    pub srcmd5: Option<String>,
    #[serde(rename = "@rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(rename = "@baserev", default, skip_serializing_if = "Option::is_none")]
    pub baserev: Option<String>,
    #[serde(rename = "@xsrcmd5", default, skip_serializing_if = "Option::is_none")]
    pub xsrcmd5: Option<String>,
    #[serde(rename = "@lsrcmd5", default, skip_serializing_if = "Option::is_none")]
    pub lsrcmd5: Option<String>,
    #[serde(rename = "@error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(rename = "@code", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "@error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "@lsrcmd5", default, skip_serializing_if = "Option::is_none")]
    pub lsrcmd5: Option<String>,
    #[serde(rename = "@xsrcmd5", default, skip_serializing_if = "Option::is_none")]
    pub xsrcmd5: Option<String>,
}

/// Source directory listing of a package revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(rename = "@vrev", default, skip_serializing_if = "Option::is_none")]
    pub vrev: Option<String>,
    #[serde(rename = "@srcmd5", default, skip_serializing_if = "Option::is_none")]
    pub srcmd5: Option<String>,
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "entry", default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<DirectoryEntry>,
    #[serde(rename = "linkinfo", default, skip_serializing_if = "Vec::is_empty")]
    pub linkinfo: Vec<LinkInfo>,
    #[serde(rename = "serviceinfo", default, skip_serializing_if = "Vec::is_empty")]
    pub serviceinfo: Vec<ServiceInfo>,
}

/// A file in a package's source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct File {
    pub name: String,
    /// MD5 hash of the file contents
    pub md5_sum: String,
    /// size in bytes
    pub size: u64,
    /// unix time of the last modification
    pub mtime: i64,
}

impl File {
    /// `None` unless the entry carries a name, an md5 sum, a size and an mtime.
    pub fn from_entry(entry: &DirectoryEntry) -> Option<Self> {
        let name = entry.name.as_deref().filter(|n| !n.is_empty())?;
        let md5_sum = entry.md5.as_deref().filter(|m| !m.is_empty())?;
        Some(Self {
            name: name.to_string(),
            md5_sum: md5_sum.to_string(),
            size: entry.size?,
            mtime: entry.mtime?,
        })
    }
}

/// Error body the service sends along with a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    #[serde(rename = "@code", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl XmlDocument for PathEntry {
    const ELEMENT_NAME: &'static str = "path";
}

impl XmlDocument for Repository {
    const ELEMENT_NAME: &'static str = "repository";
}

impl XmlDocument for Project {
    const ELEMENT_NAME: &'static str = "project";
}

impl XmlDocument for Package {
    const ELEMENT_NAME: &'static str = "package";
}

impl XmlDocument for Person {
    const ELEMENT_NAME: &'static str = "person";
}

impl XmlDocument for UserGroup {
    const ELEMENT_NAME: &'static str = "group";
}

impl XmlDocument for Owner {
    const ELEMENT_NAME: &'static str = "owner";
}

impl XmlDocument for OwnerCollection {
    const ELEMENT_NAME: &'static str = "collection";
}

impl XmlDocument for DirectoryEntry {
    const ELEMENT_NAME: &'static str = "entry";
}

impl XmlDocument for LinkInfo {
    const ELEMENT_NAME: &'static str = "linkinfo";
}

impl XmlDocument for ServiceInfo {
    const ELEMENT_NAME: &'static str = "serviceinfo";
}

impl XmlDocument for Directory {
    const ELEMENT_NAME: &'static str = "directory";
}

impl XmlDocument for ApiStatus {
    const ELEMENT_NAME: &'static str = "status";
}
