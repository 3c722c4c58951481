//! Export pipeline that writes the rendered form as static artifacts under
//! the configured base path.
//!
//! Exports describe the form's structure only. Values typed into the form
//! are never part of an artifact.

use super::config::{BuildConfig, PluginKind};
use crate::domain::{
    escape_attribute, DomainError, DomainResult, FormSchema, Node, RowDescriptor, RowRenderer,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a plugin sees for one export run.
pub struct ExportContext<'a> {
    pub config: &'a BuildConfig,
    pub rows: &'a [RowDescriptor],
    pub table: &'a Node,
}

/// One export integration producing a single artifact.
pub trait ExportPlugin {
    fn name(&self) -> &'static str;
    fn file_name(&self) -> &'static str;
    fn emit(&self, ctx: &ExportContext<'_>) -> DomainResult<String>;
}

/// Writes a standalone HTML document containing the form table.
pub struct HtmlPlugin;

impl ExportPlugin for HtmlPlugin {
    fn name(&self) -> &'static str {
        "html"
    }

    fn file_name(&self) -> &'static str {
        "index.html"
    }

    fn emit(&self, ctx: &ExportContext<'_>) -> DomainResult<String> {
        Ok(format!(
            "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
             <base href=\"{}\">\n<title>simplitrac</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            escape_attribute(&ctx.config.base),
            ctx.table.to_markup()
        ))
    }
}

/// Writes the row descriptors as `key,label,placeholder` records.
pub struct CsvPlugin;

impl ExportPlugin for CsvPlugin {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn file_name(&self) -> &'static str {
        "form.csv"
    }

    fn emit(&self, ctx: &ExportContext<'_>) -> DomainResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["key", "label", "placeholder"])
            .map_err(|e| DomainError::Export(e.to_string()))?;
        for row in ctx.rows {
            writer
                .write_record([row.key.to_string().as_str(), row.label.as_str(), row.placeholder.as_str()])
                .map_err(|e| DomainError::Export(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| DomainError::Export(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| DomainError::Export(e.to_string()))
    }
}

impl PluginKind {
    pub fn instantiate(self) -> Box<dyn ExportPlugin> {
        match self {
            PluginKind::Html => Box::new(HtmlPlugin),
            PluginKind::Csv => Box::new(CsvPlugin),
        }
    }
}

/// One rendered artifact, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub plugin: &'static str,
    pub file_name: &'static str,
    /// Path the artifact is served under, prefixed by the base path
    pub asset_path: String,
    pub contents: String,
}

/// Runs the configured plugins in order.
pub struct ExportPipeline {
    config: BuildConfig,
    plugins: Vec<Box<dyn ExportPlugin>>,
}

impl ExportPipeline {
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            config: config.clone(),
            plugins: config.plugins.iter().map(|kind| kind.instantiate()).collect(),
        }
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Renders every artifact in memory, in plugin order.
    pub fn build(&self, schema: &FormSchema) -> DomainResult<Vec<Artifact>> {
        let rows = RowRenderer::render(schema);
        let table = RowRenderer::build_table(&rows);
        let ctx = ExportContext {
            config: &self.config,
            rows: &rows,
            table: &table,
        };

        self.plugins
            .iter()
            .map(|plugin| -> DomainResult<Artifact> {
                Ok(Artifact {
                    plugin: plugin.name(),
                    file_name: plugin.file_name(),
                    asset_path: self.config.asset_path(plugin.file_name()),
                    contents: plugin.emit(&ctx)?,
                })
            })
            .collect()
    }

    /// Writes the artifacts from [`ExportPipeline::build`] below `out_dir`
    /// and returns the written paths in plugin order.
    pub fn run(&self, schema: &FormSchema, out_dir: &Path) -> DomainResult<Vec<PathBuf>> {
        let artifacts = self.build(schema)?;

        let target = self.config.output_dir(out_dir);
        fs::create_dir_all(&target)
            .map_err(|e| DomainError::Io(format!("{}: {}", target.display(), e)))?;

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let path = target.join(artifact.file_name);
            fs::write(&path, &artifact.contents)
                .map_err(|e| DomainError::Io(format!("{}: {}", path.display(), e)))?;
            tracing::info!(
                plugin = artifact.plugin,
                asset = %artifact.asset_path,
                path = %path.display(),
                "wrote artifact"
            );
            written.push(path);
        }
        Ok(written)
    }
}
