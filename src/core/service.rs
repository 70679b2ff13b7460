use crate::core::{source_route, PackageRef, ProjectRef, Transport};
use crate::utils::error::Result;
use reqwest::Method;

/// Waits until the source services of a package have finished running.
///
/// The service holds the request open until the run completes, so the
/// transport timeout bounds how long this can take.
pub async fn service_wait<T: Transport + ?Sized>(
    transport: &T,
    project: ProjectRef<'_>,
    package: PackageRef<'_>,
) -> Result<()> {
    let route = source_route(project.name(), Some(package.name()))?;

    tracing::info!("Waiting for source services of {}", route);
    transport
        .api_request(&route, Method::POST, &[("cmd", "waitservice")], None)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::FakeTransport;

    #[tokio::test]
    async fn test_service_wait_posts_command() {
        let transport = FakeTransport::new().reply(
            Method::POST,
            "/source/home:x/pkgA",
            r#"<status code="ok"><summary>Ok</summary></status>"#,
        );

        service_wait(&transport, "home:x".into(), "pkgA".into())
            .await
            .unwrap();

        let calls = transport.calls().await;
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(
            calls[0].params,
            vec![("cmd".to_string(), "waitservice".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_service_run_propagates() {
        let transport = FakeTransport::new().fail(Method::POST, "/source/home:x/pkgA", 400);

        assert!(service_wait(&transport, "home:x".into(), "pkgA".into())
            .await
            .is_err());
    }
}
