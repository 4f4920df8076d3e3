//! Update-check reply for installed extensions
//!
//! The package description points the office suite at an update URL; the
//! reply names the current version and where to download it.

use lexicon_domain::Project;

use crate::format::escape_xml;

/// Update reply template
pub const UPDATE_TEMPLATE: &str = "update.xml";

/// Fill the update template with the project's version, identifier and download URL
pub fn render_update_notification(template: &str, project: &Project, identifier: &str, download_url: &str) -> String {
    template
        .replace("$VERSION", &project.version.to_string())
        .replace("$IDENTIFIER", &escape_xml(identifier))
        .replace("$DOWNLOAD_URL", &escape_xml(download_url))
}
