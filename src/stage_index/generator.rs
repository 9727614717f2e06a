use crate::stage_index::format::{redirect_path, TOOL_MARKER};

/// Render a stage index document.
///
/// Output is byte-identical for identical inputs and always carries the
/// supported format-version marker.
pub fn render(
    app_name: &str,
    stage_version: &str,
    production_version: &str,
    rollback_version: &str,
) -> String {
    let redirect = redirect_path(app_name, stage_version);
    format!(
        "<!DOCTYPE html><html><head><title>Stage Index for {app_name}</title><script>\n\
         <!-- {TOOL_MARKER}. Hand-edit at your own risk! -->\n\
         const productionVersion='{production_version}';\n\
         const rollbackVersion='{rollback_version}';\n\
         const stageVersion='{stage_version}';\n\
         window.location.href='{redirect}';\n\
         </script></head><body></body></html>"
    )
}
