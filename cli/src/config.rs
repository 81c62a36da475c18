//! Persistent settings in `~/.recast/config.toml`.
//!
//! Reads are tolerant: a missing file or an unparsable document yields the
//! built-in defaults so the app always starts. Writes go through `toml_edit`
//! so user comments and unrelated keys survive, and refuse to touch a file
//! that does not parse rather than clobber it.
//!
//! ```toml
//! max_upload_mb = 100
//! accepted = "audio"            # or "any"
//! auth_url = "https://auth.example.com/"
//!
//! [[platform]]
//! id = "linkedin"
//! display_name = "LinkedIn"
//! default_quantity = 2
//! max_quantity = 5
//!
//! [auth]
//! last_email = "user@example.com"
//! ```

use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use recast_core::AcceptedCategory;
use recast_core::PlatformCatalog;
use recast_core::PlatformOption;
use recast_core::UploadConstraints;
use toml_edit::DocumentMut;
use toml_edit::Item as TomlItem;
use toml_edit::Table as TomlTable;
use tempfile::NamedTempFile;
use toml_edit::value;
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub constraints: UploadConstraints,
    pub catalog: PlatformCatalog,
    pub auth_url: Option<Url>,
    pub last_email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn new_default() -> anyhow::Result<Self> {
        let Some(home) = dirs::home_dir() else {
            anyhow::bail!("cannot determine home directory for config path");
        };
        Ok(Self::new(default_config_path(&home)))
    }

    /// Load settings, falling back to defaults for anything missing or
    /// malformed. Only an I/O failure is an error.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let Some(content) = read_document_string(&self.path)? else {
            return Ok(Settings::default());
        };

        let doc = match content.parse::<DocumentMut>() {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!("config.toml does not parse, using defaults: {err}");
                return Ok(Settings::default());
            }
        };

        Ok(Settings {
            constraints: read_constraints(&doc),
            catalog: read_catalog(&doc),
            auth_url: read_auth_url(&doc),
            last_email: read_last_email(&doc),
        })
    }

    /// Remember the last signed-in email under `[auth]`, preserving comments
    /// and unrelated keys. Refuses to rewrite an unparsable file.
    pub fn set_last_email(&self, email: &str) -> anyhow::Result<()> {
        let content = read_document_string(&self.path)?.unwrap_or_default();

        let mut doc = content
            .parse::<DocumentMut>()
            .map_err(|err| anyhow::anyhow!("config.toml is not valid TOML, not rewriting: {err}"))?;

        let auth = ensure_table_for_write(&mut doc, "auth");
        auth["last_email"] = value(email);

        self.write_document(&doc)
    }

    /// Render the document and replace the file through a temp file + rename
    /// in the same directory, so an interrupted write never leaves a
    /// truncated config behind.
    fn write_document(&self, doc: &DocumentMut) -> anyhow::Result<()> {
        let Some(parent) = self.path.parent() else {
            anyhow::bail!("invalid config path: {}", self.path.display());
        };
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;

        let mut rendered = doc.to_string();
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }

        let mut tmp = NamedTempFile::new_in(parent).context("create temp config")?;
        tmp.write_all(rendered.as_bytes())
            .context("write temp config")?;
        tmp.flush().context("flush temp config")?;
        tmp.persist(&self.path).map_err(|err| {
            anyhow::Error::new(err.error)
                .context(format!("persist config to {}", self.path.display()))
        })?;

        Ok(())
    }
}

fn default_config_path(home: &Path) -> PathBuf {
    home.join(".recast").join("config.toml")
}

fn read_constraints(doc: &DocumentMut) -> UploadConstraints {
    let mut constraints = UploadConstraints::default();

    if let Some(limit) = doc
        .get("max_upload_mb")
        .and_then(TomlItem::as_integer)
        .and_then(|v| u64::try_from(v).ok())
        && limit > 0
    {
        constraints.max_size_bytes = UploadConstraints::mb_to_bytes(limit);
    }

    if let Some(accepted) = doc.get("accepted").and_then(TomlItem::as_str) {
        match accepted {
            "any" => constraints.accepted = AcceptedCategory::Any,
            "audio" => constraints.accepted = AcceptedCategory::Audio,
            other => tracing::warn!("unknown accepted category in config: {other}"),
        }
    }

    constraints
}

/// Read `[[platform]]` rows. Rows missing a field are skipped; rows with
/// inconsistent bounds are dropped by the catalog constructor. An absent or
/// fully invalid list falls back to the built-in catalog so the picker is
/// never empty.
fn read_catalog(doc: &DocumentMut) -> PlatformCatalog {
    let Some(rows) = doc.get("platform").and_then(TomlItem::as_array_of_tables) else {
        return PlatformCatalog::default();
    };

    let options: Vec<PlatformOption> = rows.iter().filter_map(read_platform_row).collect();
    let catalog = PlatformCatalog::new(options);
    if catalog.is_empty() {
        tracing::warn!("no usable [[platform]] entries in config, using defaults");
        return PlatformCatalog::default();
    }
    catalog
}

fn read_platform_row(row: &TomlTable) -> Option<PlatformOption> {
    let id = row.get("id").and_then(TomlItem::as_str)?;
    let display_name = row.get("display_name").and_then(TomlItem::as_str)?;
    let default_quantity = read_quantity(row, "default_quantity")?;
    let max_quantity = read_quantity(row, "max_quantity")?;
    Some(PlatformOption {
        id: id.to_string(),
        display_name: display_name.to_string(),
        default_quantity,
        max_quantity,
    })
}

fn read_quantity(row: &TomlTable, key: &str) -> Option<u32> {
    row.get(key)
        .and_then(TomlItem::as_integer)
        .and_then(|v| u32::try_from(v).ok())
}

fn read_auth_url(doc: &DocumentMut) -> Option<Url> {
    let raw = doc.get("auth_url").and_then(TomlItem::as_str)?;
    match raw.parse::<Url>() {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::warn!("ignoring invalid auth_url in config: {err}");
            None
        }
    }
}

fn read_last_email(doc: &DocumentMut) -> Option<String> {
    doc.get("auth")
        .and_then(TomlItem::as_table)
        .and_then(|auth| auth.get("last_email"))
        .and_then(TomlItem::as_str)
        .map(str::to_string)
}

fn ensure_table_for_write<'a>(doc: &'a mut DocumentMut, key: &str) -> &'a mut TomlTable {
    if doc.get(key).and_then(TomlItem::as_table).is_none() {
        let mut table = TomlTable::new();
        table.set_implicit(false);
        doc[key] = TomlItem::Table(table);
    }
    match &mut doc[key] {
        TomlItem::Table(table) => table,
        _ => unreachable!("expected `{key}` to be a table"),
    }
}

fn read_document_string(path: &Path) -> anyhow::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(anyhow::Error::new(err).context("read config.toml")),
    }
}
