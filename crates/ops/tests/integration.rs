//! Integration tests for ops crate

#[cfg(test)]
mod tests {
    use retrial_config::{Config, SourceKind};
    use retrial_errors::{DiscoveryError, Error, HashError, VerifyError};
    use retrial_events::{AppEvent, EventReceiver, GeneralEvent, VerificationEvent};
    use retrial_ops::*;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};
    use tokio::fs;

    const MANIFEST: &str = r#"
[[dependency]]
group = "com.example"
name = "core"
version = "1.0"
path = "libs/core-1.0.jar"

[[dependency]]
group = "com.example"
name = "ui"
version = "2.1"
path = "libs/ui-2.1.aar"
"#;

    async fn create_project() -> TempDir {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("libs")).await.unwrap();
        fs::write(temp.path().join("libs/core-1.0.jar"), b"core bytes")
            .await
            .unwrap();
        fs::write(temp.path().join("libs/ui-2.1.aar"), b"ui bytes")
            .await
            .unwrap();
        fs::write(temp.path().join("retrial-dependencies.toml"), MANIFEST)
            .await
            .unwrap();
        temp
    }

    fn manifest_config(root: &Path) -> Config {
        let mut config = Config::default();
        config.source.kind = SourceKind::Manifest;
        config.source.manifest = Some(root.join("retrial-dependencies.toml"));
        config.paths.checksum_file = Some(root.join("retrial-checksums.json"));
        config.verify.max_concurrency = 2;
        config
    }

    fn create_context(config: Config) -> (OpsCtx, EventReceiver) {
        let (tx, rx) = retrial_events::channel();
        let ctx = OpsContextBuilder::new()
            .with_config(config)
            .with_event_sender(tx)
            .build()
            .unwrap();
        (ctx, rx)
    }

    fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_record_then_verify() {
        let project = create_project().await;
        let (ctx, mut rx) = create_context(manifest_config(project.path()));

        let recorded = record(&ctx).await.unwrap();
        assert_eq!(recorded.recorded, 2);
        assert!(project.path().join("retrial-checksums.json").exists());

        let verified = verify(&ctx).await.unwrap();
        assert_eq!(verified.verified, 2);
        assert_eq!(verified.run_id, ctx.run_id);

        let events = drain(&mut rx);
        assert!(events.iter().any(|event| matches!(
            event,
            AppEvent::Verification(VerificationEvent::Recorded { dependencies: 2, .. })
        )));
        assert!(events.iter().any(|event| matches!(
            event,
            AppEvent::Verification(VerificationEvent::Succeeded { verified: 2, .. })
        )));
        let hashed = events
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    AppEvent::Verification(VerificationEvent::DependencyHashed { .. })
                )
            })
            .count();
        assert_eq!(hashed, 4);
    }

    #[tokio::test]
    async fn test_modified_artifact_fails_verification() {
        let project = create_project().await;
        let (ctx, mut rx) = create_context(manifest_config(project.path()));
        record(&ctx).await.unwrap();

        fs::write(project.path().join("libs/ui-2.1.aar"), b"tampered")
            .await
            .unwrap();

        let err = verify(&ctx).await.unwrap_err();
        assert!(err.is_verification_failure());
        let Error::Verify(VerifyError::DependenciesChanged { diff }) = err else {
            panic!("expected mismatch");
        };
        assert_eq!(diff.changed_dependencies.len(), 1);
        assert_eq!(
            diff.changed_dependencies.keys().next().unwrap().to_string(),
            "com.example:ui:2.1"
        );

        let events = drain(&mut rx);
        assert!(events.iter().any(|event| matches!(
            event,
            AppEvent::Verification(VerificationEvent::Failed { .. })
        )));
        assert!(events.iter().any(|event| matches!(
            event,
            AppEvent::General(GeneralEvent::OperationCompleted { success: false, .. })
        )));
    }

    #[tokio::test]
    async fn test_fresh_project_reports_everything_as_additional() {
        let project = create_project().await;
        let (ctx, _rx) = create_context(manifest_config(project.path()));

        let err = verify(&ctx).await.unwrap_err();
        let Error::Verify(VerifyError::DependenciesChanged { diff }) = err else {
            panic!("expected mismatch");
        };
        assert_eq!(diff.additional_dependencies.len(), 2);
        assert!(!project.path().join("retrial-checksums.json").exists());
    }

    #[tokio::test]
    async fn test_empty_artifact_is_a_tool_failure() {
        let project = create_project().await;
        fs::write(project.path().join("libs/core-1.0.jar"), b"")
            .await
            .unwrap();
        let (ctx, mut rx) = create_context(manifest_config(project.path()));

        let err = record(&ctx).await.unwrap_err();
        assert!(matches!(err, Error::Hash(HashError::EmptyFile { .. })));
        assert!(!err.is_verification_failure());
        assert!(!project.path().join("retrial-checksums.json").exists());

        let events = drain(&mut rx);
        assert!(events.iter().any(|event| matches!(
            event,
            AppEvent::General(GeneralEvent::OperationFailed { .. })
        )));
    }

    #[tokio::test]
    async fn test_repository_source() {
        let project = tempdir().unwrap();
        let artifact = project.path().join("repo/org/sample/util/3.0/util-3.0.jar");
        fs::create_dir_all(artifact.parent().unwrap()).await.unwrap();
        fs::write(&artifact, b"util bytes").await.unwrap();

        let mut config = Config::default();
        config.source.kind = SourceKind::Repository;
        config.source.repository = Some(project.path().join("repo"));
        config.paths.checksum_file = Some(project.path().join("db/checksums.json"));
        let (ctx, _rx) = create_context(config);

        assert_eq!(record(&ctx).await.unwrap().recorded, 1);
        assert_eq!(verify(&ctx).await.unwrap().verified, 1);
    }

    #[tokio::test]
    async fn test_missing_manifest_is_discovery_error() {
        let project = tempdir().unwrap();
        let (ctx, _rx) = create_context(manifest_config(project.path()));

        let err = verify(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Discovery(DiscoveryError::ManifestNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_operation_result_json() {
        let project = create_project().await;
        let (ctx, _rx) = create_context(manifest_config(project.path()));
        let report = record(&ctx).await.unwrap();

        let result = OperationResult::Recorded(report);
        assert!(result.is_success());
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "recorded");
        assert_eq!(json["data"]["recorded"], 2);
    }

    #[tokio::test]
    async fn test_context_requires_event_sender() {
        let result = OpsContextBuilder::new().with_config(Config::default()).build();
        assert!(result.is_err());
    }
}
