//! Cleanup orchestration.
//!
//! Mirrors the export tree into the destination module while running the
//! per-file transforms, then applies the whole-tree passes and finalizes
//! the manifest.

use crate::circular;
use crate::constants::{NOT_USER_CREATED_FILES, circular::MAP_FILE};
use crate::db;
use crate::error::{Error, Result};
use crate::manifest::{self, RewriteOptions};
use crate::pipeline::processor::{ProcessContext, process_xml_file};
use crate::pipeline::{DemoOrder, progress};
use crate::postprocess;
use crate::rpc::RpcClient;
use crate::rules::{ComputedFieldScrubber, IdentifierRules, build_id_map};
use crate::scaffold;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Options for one cleanup run.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Target module slug.
    pub module_name: String,
    /// Path to the exported studio_customization directory.
    pub studio_path: PathBuf,
    /// Base directory the cleaned module is written under.
    pub destination: PathBuf,
    /// Database name on the server.
    pub db_name: String,
    /// Server HTTP port.
    pub port: u16,
    /// Server base URL without port.
    pub base_url: String,
    /// Admin login.
    pub login: String,
    /// Admin password.
    pub password: String,
    /// Skip every server call.
    pub offline: bool,
    /// Skip the psql credential reset.
    pub skip_db_reset: bool,
    /// Overwrite an existing destination module directory.
    pub force: bool,
    /// Show the progress bar.
    pub progress_enabled: bool,
    /// Globally unwanted field names.
    pub unwanted_fields: Vec<String>,
    /// Manifest rewrite inputs.
    pub rewrite: RewriteOptions,
}

/// Counters reported after a cleanup run.
#[derive(Debug, Default)]
pub struct CleanSummary {
    /// Destination module directory.
    pub destination: PathBuf,
    /// XML files transformed.
    pub xml_files: usize,
    /// Files copied verbatim.
    pub copied_files: usize,
    /// SCSS customizations replayed.
    pub scss_customizations: usize,
    /// Fields removed to break circular dependencies.
    pub circular_fields: usize,
}

/// Run the full cleanup.
pub fn clean_module(opts: &CleanOptions) -> Result<CleanSummary> {
    if !opts.studio_path.is_dir() {
        return Err(Error::StudioPathNotFound {
            path: opts.studio_path.clone(),
        });
    }

    let module_dir = opts.destination.join(&opts.module_name);
    if module_dir.exists() {
        if opts.force {
            std::fs::remove_dir_all(&module_dir)?;
        } else {
            return Err(Error::DestinationExists { path: module_dir });
        }
    }
    std::fs::create_dir_all(&module_dir)?;

    if opts.skip_db_reset {
        debug!("Skipping admin credential reset");
    } else {
        db::reset_admin_credentials(&opts.db_name, &opts.login, &opts.password)?;
    }

    // Everything derived from the source tree is collected up front.
    let chains = circular::parse_warnings(&opts.studio_path)?;
    if !chains.is_empty() {
        info!("Found {} circular dependency chain(s)", chains.len());
    }
    let id_map = build_id_map(&opts.studio_path.join("data"))?;
    debug!("Derived {} stable record id(s)", id_map.len());
    let default_pricelist_id =
        postprocess::find_default_pricelist_id(&opts.studio_path)?;

    let rules = IdentifierRules::new(&opts.module_name);
    let mut scrubber = if opts.offline {
        info!("Offline run: computed-field removal skipped");
        None
    } else {
        let mut client = RpcClient::new(
            &opts.base_url,
            opts.port,
            &opts.db_name,
            &opts.login,
            &opts.password,
        )?;
        client.authenticate()?;
        Some(ComputedFieldScrubber::new(client))
    };

    let mut summary = CleanSummary {
        destination: module_dir.clone(),
        ..CleanSummary::default()
    };
    let mut demo = DemoOrder::new();
    let mut scss = Vec::new();

    let entries: Vec<_> = WalkDir::new(&opts.studio_path)
        .sort_by_file_name()
        .into_iter()
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| Error::FileRead {
            path: opts.studio_path.clone(),
            source: e.into(),
        })?;
    let file_count = entries.iter().filter(|e| e.file_type().is_file()).count();
    let bar = progress::create_file_progress(file_count, opts.progress_enabled);

    for entry in &entries {
        let Ok(rel) = entry.path().strip_prefix(&opts.studio_path) else {
            continue;
        };
        if rel.as_os_str().is_empty() {
            continue;
        }

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(module_dir.join(rel))?;
            continue;
        }

        let file_name = rel
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent_dir = rel
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let in_demo_dir = parent_dir == "demo";
        let in_attachment_dir = parent_dir == "ir_attachment";
        let extension = rel
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xml" => {
                let content = read(entry.path())?;
                let mut ctx = ProcessContext {
                    rules: &rules,
                    id_map: &id_map,
                    default_pricelist_id: default_pricelist_id.as_deref(),
                    unwanted_fields: &opts.unwanted_fields,
                    scrubber: scrubber.as_mut(),
                };
                let content =
                    process_xml_file(entry.path(), &content, in_demo_dir, &mut ctx, &mut demo)?;
                write(&module_dir.join(rel), &content)?;
                summary.xml_files += 1;
            }
            "py" | "txt" => {
                if file_name == "__manifest__.py" {
                    let content = read(entry.path())?;
                    let parsed = manifest::parse_manifest(&content).map_err(|message| {
                        Error::ManifestParse {
                            path: entry.path().to_path_buf(),
                            message,
                        }
                    })?;
                    let rewritten = manifest::rewrite_manifest(&parsed, &opts.rewrite);
                    write(
                        &module_dir.join("__manifest__.py"),
                        &manifest::write_manifest(&rewritten),
                    )?;
                }
            }
            "scss" if in_attachment_dir => {
                let content = read(entry.path())?;
                if let Some(customization) = scaffold::extract_scss(&file_name, &content) {
                    scss.push(customization);
                }
            }
            _ if extension.is_empty() || in_attachment_dir => {
                std::fs::copy(entry.path(), module_dir.join(rel)).map_err(|e| {
                    Error::FileWrite {
                        path: module_dir.join(rel),
                        source: e,
                    }
                })?;
                summary.copied_files += 1;
            }
            _ => debug!("Skipping {}", rel.display()),
        }
        if entry.file_type().is_file() {
            progress::inc_progress(bar.as_ref());
        }
    }
    progress::finish_progress(bar, "Mirrored");
    summary.scss_customizations = scss.len();

    // Whole-tree passes over the destination.
    scaffold::write_scss_functions(&module_dir, &scss)?;
    postprocess::fix_on_delete_fields(&module_dir)?;
    for file_name in NOT_USER_CREATED_FILES {
        postprocess::remove_external_records(&module_dir, file_name)?;
    }
    postprocess::remove_default_pricelist(&module_dir)?;
    postprocess::remove_unused_attachments(&module_dir, &opts.destination)?;
    postprocess::order_attachments(&module_dir)?;
    postprocess::clean_knowledge_article(&module_dir)?;

    if let Some(scrubber) = scrubber.as_mut() {
        if scrubber.source_mut().module_installed("website_sale")? {
            scaffold::write_demo_payment_provider(&module_dir)?;
            demo.push_file("payment_provider_demo.xml");
        }
    }

    scaffold::add_theme_install(&module_dir)?;
    postprocess::clean_sale_order_lines(&module_dir)?;

    rename_website_view(&module_dir)?;
    finalize(opts, &module_dir, demo, &chains, &mut summary)?;

    scaffold::write_mandatory_files(
        &module_dir,
        &opts.module_name,
        &opts.rewrite.module_title,
    )?;

    info!(
        "Cleaned module written to {} ({} XML files, {} copied, {} SCSS customizations)",
        module_dir.display(),
        summary.xml_files,
        summary.copied_files,
        summary.scss_customizations,
    );
    Ok(summary)
}

/// `demo/ir_ui_view.xml` ships as `demo/website_view.xml`.
fn rename_website_view(module_dir: &Path) -> Result<()> {
    let old = module_dir.join("demo").join("ir_ui_view.xml");
    if old.exists() {
        let new = module_dir.join("demo").join("website_view.xml");
        std::fs::rename(&old, &new).map_err(|e| Error::FileWrite {
            path: new,
            source: e,
        })?;
    }
    Ok(())
}

/// Re-read the mirrored manifest, prune emptied data files, break the
/// circular chains and write the final manifest.
fn finalize(
    opts: &CleanOptions,
    module_dir: &Path,
    demo: DemoOrder,
    chains: &[circular::DependencyChain],
    summary: &mut CleanSummary,
) -> Result<()> {
    let manifest_path = module_dir.join("__manifest__.py");
    let content = read(&manifest_path)?;
    let mut manifest =
        manifest::parse_manifest(&content).map_err(|message| Error::ManifestParse {
            path: manifest_path.clone(),
            message,
        })?;

    for entry in postprocess::prune_empty_data_files(module_dir)? {
        debug!("Pruned empty data file {entry}");
        manifest.remove_list_item("data", &entry);
    }

    manifest::finalize_manifest(&mut manifest, demo.finalize(), &opts.rewrite);

    if !chains.is_empty() {
        let removed = circular::break_chains(module_dir, chains)?;
        summary.circular_fields = removed.len();
        if removed.is_empty() {
            warn!("Circular dependency chains listed, but no fields to remove were found");
        } else {
            info!(
                "Removed {} field(s) to break circular dependencies",
                removed.len()
            );
            let (data_written, demo_written) = circular::write_map_files(module_dir, &removed)?;
            if data_written {
                manifest.push_list_item("data", format!("data/{MAP_FILE}"));
            }
            if demo_written {
                manifest.push_list_item("demo", format!("demo/{MAP_FILE}"));
            }
        }
    }

    write(&manifest_path, &manifest::write_manifest(&manifest))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
