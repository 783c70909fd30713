//! Uninstall.

use crate::ops::{Context, OpsError, not_found_message};
use gdvm_core::ArtifactKind;
use gdvm_schema::VersionSpec;
use std::fs;

/// Remove the installed directory for `spec`.
///
/// Returns whether anything was removed. A version that is not installed
/// (or not known upstream) is reported only when `log_missing` is set;
/// either way the call succeeds.
pub async fn uninstall(
    ctx: &Context,
    spec: &VersionSpec,
    kind: ArtifactKind,
    log_missing: bool,
) -> Result<bool, OpsError> {
    let semver = match ctx.env.resolve_version(spec).await {
        Ok(semver) => semver,
        Err(e) if e.is_not_found() => {
            tracing::debug!(error = %e, "nothing to uninstall");
            if log_missing {
                ctx.reporter.info(&not_found_message(kind, spec));
            }
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    let target = ctx.config.install_root(kind).join(semver.local_name());
    if !target.exists() {
        tracing::debug!(target = %target.display(), "not installed");
        if log_missing {
            ctx.reporter
                .info(&format!("{} {semver} not found", kind.label()));
        }
        return Ok(false);
    }

    fs::remove_dir_all(&target).map_err(|e| OpsError::fs("Failed to remove install", e))?;
    ctx.reporter
        .success(&format!("Uninstalled {} {semver}", kind.label()));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::install::install;
    use crate::ops::testing::{Harness, engine_release};
    use gdvm_schema::Version;

    fn spec(version: &str) -> VersionSpec {
        VersionSpec::build(version, "stable", false).unwrap()
    }

    #[tokio::test]
    async fn test_uninstall_removes_install() {
        let h = Harness::new(vec![engine_release(Version::new(4, 2, 1, 0))]);
        let target = install(&h.ctx, &spec("4.2.1"), ArtifactKind::Engine)
            .await
            .unwrap()
            .unwrap();

        let removed = uninstall(&h.ctx, &spec("4.2.1"), ArtifactKind::Engine, true)
            .await
            .unwrap();

        assert!(removed);
        assert!(!target.exists());
        assert!(h.reporter.contains("Uninstalled"));
    }

    #[tokio::test]
    async fn test_missing_install_logged_when_requested() {
        let h = Harness::new(vec![engine_release(Version::new(4, 2, 1, 0))]);

        let removed = uninstall(&h.ctx, &spec("4.2.1"), ArtifactKind::Engine, true)
            .await
            .unwrap();

        assert!(!removed);
        assert!(h.reporter.contains("not found"));
    }

    #[tokio::test]
    async fn test_missing_install_silent_otherwise() {
        let h = Harness::new(vec![engine_release(Version::new(4, 2, 1, 0))]);

        let removed = uninstall(&h.ctx, &spec("4.2.1"), ArtifactKind::Engine, false)
            .await
            .unwrap();
        let unknown = uninstall(&h.ctx, &spec("9.9"), ArtifactKind::Engine, false)
            .await
            .unwrap();

        assert!(!removed);
        assert!(!unknown);
        assert!(h.reporter.messages().is_empty());
    }
}
