use crate::models::Artifact;

/// Canonical console URL of an artifact's latest version, lowercased.
///
/// `/providers/{namespace}/{name}/{version}` or
/// `/modules/{namespace}/{name}/{provider}/{version}`. Artifacts without
/// versions link to the unversioned page.
pub fn compute_artifact_url(artifact: &Artifact) -> String {
    let slug = artifact.slug();
    let mut segments = slug.segments();
    if let Some(version) = artifact.latest_version() {
        segments.push(version);
    }

    format!("/{}/{}", artifact.kind.category(), segments.join("/")).to_lowercase()
}
