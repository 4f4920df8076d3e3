//! Extension package (`.oxt`) assembly
//!
//! The package is a zip with a fixed layout that the office suite's
//! extension installer expects:
//!
//! ```text
//! dictionaries/<code>_PG.dic
//! dictionaries/<code>_PG.aff
//! dictionaries.xcu
//! description.xml
//! License.txt
//! META-INF/manifest.xml
//! ```

use lexicon_domain::{sanitize, Project};
use std::fs;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::format::escape_xml;
use crate::{ExportConfig, ExportError, ExportStore, RequestContext};

/// Package description template, substituted
pub const DESCRIPTION_TEMPLATE: &str = "description.xml";
/// Dictionary registration template, substituted
pub const REGISTRATION_TEMPLATE: &str = "dictionaries.xcu";
/// License, copied verbatim
pub const LICENSE_TEMPLATE: &str = "License.txt";
/// Manifest, copied under `META-INF/`
pub const MANIFEST_TEMPLATE: &str = "manifest.xml";

const MANIFEST_ENTRY: &str = "META-INF/manifest.xml";
const PACKAGE_EXTENSION: &str = "oxt";

/// The four package templates, read up front
#[derive(Debug, Clone)]
pub struct Templates {
    description: String,
    registration: String,
    license: Vec<u8>,
    manifest: Vec<u8>,
}

impl Templates {
    /// Read all four templates from `dir`
    ///
    /// Any missing or unreadable template fails the whole load.
    pub fn load(dir: &Path) -> Result<Self, ExportError> {
        Ok(Self {
            description: read_text(dir, DESCRIPTION_TEMPLATE)?,
            registration: read_text(dir, REGISTRATION_TEMPLATE)?,
            license: read_bytes(dir, LICENSE_TEMPLATE)?,
            manifest: read_bytes(dir, MANIFEST_TEMPLATE)?,
        })
    }
}

pub(crate) fn read_bytes(dir: &Path, name: &str) -> Result<Vec<u8>, ExportError> {
    let path = dir.join(name);
    fs::read(&path).map_err(|source| ExportError::TemplateMissing { path, source })
}

pub(crate) fn read_text(dir: &Path, name: &str) -> Result<String, ExportError> {
    let bytes = read_bytes(dir, name)?;
    String::from_utf8(bytes).map_err(|e| ExportError::TemplateMissing {
        path: dir.join(name),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })
}

/// Builds extension packages from a word list and the project's affix rules
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    template_dir: PathBuf,
    update_path: String,
}

impl PackageBuilder {
    /// Create a builder reading templates from `template_dir`
    ///
    /// `update_path` may contain `{code}`, replaced by the project code.
    pub fn new(template_dir: impl Into<PathBuf>, update_path: impl Into<String>) -> Self {
        Self {
            template_dir: template_dir.into(),
            update_path: update_path.into(),
        }
    }

    /// Create a builder from export configuration
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(&config.template_dir, &config.update_path)
    }

    /// Template directory
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Read the package templates
    pub fn load_templates(&self) -> Result<Templates, ExportError> {
        Templates::load(&self.template_dir)
    }

    /// Substitute project metadata into the description template
    pub fn render_description(&self, templates: &Templates, project: &Project, ctx: &RequestContext) -> String {
        let code = sanitize(&project.code);
        let update_url = ctx.absolute_uri(&self.update_path.replace("{code}", &code));
        templates
            .description
            .replace("$VERSION", &project.version.to_string())
            .replace("$LANGUAGE_NAME", &escape_xml(&project.name))
            .replace("$LANG_CODE", &code)
            .replace("$UPDATE_URL", &escape_xml(&update_url))
    }

    /// Substitute the project code into the registration template
    pub fn render_registration(&self, templates: &Templates, project: &Project) -> String {
        templates
            .registration
            .replace("$LANG_CODE", &sanitize(&project.code))
    }

    /// Encode the package as zip bytes
    pub fn render(
        &self,
        templates: &Templates,
        project: &Project,
        word_list: &str,
        ctx: &RequestContext,
    ) -> Result<Vec<u8>, ExportError> {
        let code = sanitize(&project.code);
        let description = self.render_description(templates, project, ctx);
        let registration = self.render_registration(templates, project);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let files: [(String, &[u8]); 6] = [
            (format!("dictionaries/{}_PG.dic", code), word_list.as_bytes()),
            (format!("dictionaries/{}_PG.aff", code), project.affix_rules.as_bytes()),
            (REGISTRATION_TEMPLATE.to_string(), registration.as_bytes()),
            (DESCRIPTION_TEMPLATE.to_string(), description.as_bytes()),
            (LICENSE_TEMPLATE.to_string(), templates.license.as_slice()),
            (MANIFEST_ENTRY.to_string(), templates.manifest.as_slice()),
        ];

        for (name, data) in files {
            zip.start_file(name, options)?;
            zip.write_all(data).map_err(ZipError::Io)?;
        }

        Ok(zip.finish()?.into_inner())
    }

    /// Build the package and publish it to the export store
    ///
    /// Templates are read before anything is written, so a missing
    /// template never leaves a partial package behind.
    pub fn build_archive(
        &self,
        store: &ExportStore,
        project: &Project,
        word_list: &str,
        ctx: &RequestContext,
    ) -> Result<PathBuf, ExportError> {
        let templates = self.load_templates()?;
        let bytes = self.render(&templates, project, word_list, ctx)?;
        store.publish(project, PACKAGE_EXTENSION, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn template_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DESCRIPTION_TEMPLATE),
            "<version value=\"$VERSION\"/><name>$LANGUAGE_NAME</name><id>$LANG_CODE</id><update>$UPDATE_URL</update>",
        )
        .unwrap();
        fs::write(dir.path().join(REGISTRATION_TEMPLATE), "<node>$LANG_CODE_PG</node>").unwrap();
        fs::write(dir.path().join(LICENSE_TEMPLATE), "MIT").unwrap();
        fs::write(dir.path().join(MANIFEST_TEMPLATE), "<manifest/>").unwrap();
        dir
    }

    fn project() -> Project {
        Project::new("kgu", "Kovol & Friends")
            .with_version(3)
            .with_affix_rules("SFX A Y 1")
    }

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_description_substitution() {
        let dir = template_dir();
        let builder = PackageBuilder::new(dir.path(), "/lexicon/{code}/oxt-update");
        let templates = builder.load_templates().unwrap();

        let ctx = RequestContext::new("http://testserver");
        let description = builder.render_description(&templates, &project(), &ctx);
        assert_eq!(
            description,
            "<version value=\"3\"/><name>Kovol &amp; Friends</name><id>kgu</id><update>http://testserver/lexicon/kgu/oxt-update</update>"
        );
    }

    #[test]
    fn test_registration_substitution() {
        let dir = template_dir();
        let builder = PackageBuilder::new(dir.path(), "/u");
        let templates = builder.load_templates().unwrap();
        assert_eq!(builder.render_registration(&templates, &project()), "<node>kgu_PG</node>");
    }

    #[test]
    fn test_render_layout() {
        let dir = template_dir();
        let builder = PackageBuilder::new(dir.path(), "/u/{code}");
        let templates = builder.load_templates().unwrap();
        let ctx = RequestContext::new("http://testserver");

        let bytes = builder.render(&templates, &project(), "1\nhobol/A", &ctx).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "License.txt",
                "META-INF/manifest.xml",
                "description.xml",
                "dictionaries.xcu",
                "dictionaries/kgu_PG.aff",
                "dictionaries/kgu_PG.dic",
            ]
        );

        assert_eq!(read_entry(&bytes, "dictionaries/kgu_PG.dic"), "1\nhobol/A");
        assert_eq!(read_entry(&bytes, "dictionaries/kgu_PG.aff"), "SFX A Y 1");
        assert_eq!(read_entry(&bytes, "License.txt"), "MIT");
        assert_eq!(read_entry(&bytes, "META-INF/manifest.xml"), "<manifest/>");
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let dir = template_dir();
        fs::remove_file(dir.path().join(LICENSE_TEMPLATE)).unwrap();

        let out = TempDir::new().unwrap();
        let store = ExportStore::new(out.path());
        let builder = PackageBuilder::new(dir.path(), "/u");
        let ctx = RequestContext::new("http://testserver");

        let result = builder.build_archive(&store, &project(), "0", &ctx);
        match result {
            Err(ExportError::TemplateMissing { path, .. }) => {
                assert!(path.ends_with(LICENSE_TEMPLATE));
            }
            other => panic!("expected TemplateMissing, got {:?}", other),
        }
        assert!(!store.export_path(&project(), "oxt").exists());
    }

    #[test]
    fn test_non_utf8_template_is_rejected() {
        let dir = template_dir();
        fs::write(dir.path().join(DESCRIPTION_TEMPLATE), [0xff, 0xfe, 0x00]).unwrap();

        let result = Templates::load(dir.path());
        assert!(matches!(result, Err(ExportError::TemplateMissing { .. })));
    }
}
