// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// AMQP Definitions Generator
//
// Generates per-type binding headers + one umbrella header + one umbrella
// source file from:
// - amqp_definitions.xml (the protocol type schema)
// - amqdef.yaml (optional run configuration)

use amqdef::Generator;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;

/// Scaffold wrapped around every generated header. The declaration bodies
/// come from the generator core; everything here is presentation.
const HEADER_TEMPLATE: &str = r#"// This file is generated. DO NOT EDIT it manually.
// The generator that produces it lives in tools/amqdef-gen.

#ifndef {{ guard }}
#define {{ guard }}

#ifdef __cplusplus
#include <cstdint>
extern "C" {
#else
#include <stdint.h>
#include <stdbool.h>
#endif

#include "amqpvalue.h"

{{ body }}

#ifdef __cplusplus
}
#endif

#endif /* {{ guard }} */
"#;

const SOURCE_TEMPLATE: &str = r#"// This file is generated. DO NOT EDIT it manually.
// The generator that produces it lives in tools/amqdef-gen.

#include <stdlib.h>
#include <stdint.h>
#include <stdbool.h>
#include "amqpvalue.h"
#include "{{ umbrella_header }}"

{{ body }}
"#;

/// Run configuration, loaded from `amqdef.yaml` in the base directory.
/// Every field has a default so the file is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default)]
    pub output_dirs: OutputDirs,
    #[serde(default)]
    pub umbrella: UmbrellaNames,
    #[serde(default = "default_manifest_output")]
    pub manifest_output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDirs {
    pub headers: String,
    pub sources: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UmbrellaNames {
    pub declarations: String,
    pub definitions: String,
}

fn default_schema() -> String {
    "amqp_definitions.xml".into()
}

fn default_manifest_output() -> String {
    "generated/manifest.json".into()
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            output_dirs: OutputDirs::default(),
            umbrella: UmbrellaNames::default(),
            manifest_output: default_manifest_output(),
        }
    }
}

impl Default for OutputDirs {
    fn default() -> Self {
        Self {
            headers: "generated/inc".into(),
            sources: "generated/src".into(),
        }
    }
}

impl Default for UmbrellaNames {
    fn default() -> Self {
        Self {
            declarations: "amqp_definitions.h".into(),
            definitions: "amqp_definitions.c".into(),
        }
    }
}

impl GenConfig {
    /// Load configuration from `amqdef.yaml`, falling back to defaults when
    /// the file is absent.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let config_path = base_dir.join("amqdef.yaml");
        if !config_path.exists() {
            tracing::info!("No amqdef.yaml found, using defaults");
            return Ok(Self::default());
        }

        tracing::info!("Loading config from: {:?}", config_path);
        let config_content =
            fs::read_to_string(&config_path).context("Failed to read amqdef.yaml")?;
        serde_yaml::from_str(&config_content).context("Failed to parse amqdef.yaml")
    }
}

/// Generator state
pub struct DefinitionsGenerator {
    config: GenConfig,
    base_dir: PathBuf,
    tera: Tera,
}

impl DefinitionsGenerator {
    /// Load configuration and initialize the scaffold templates.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        let config = GenConfig::load(&base_dir)?;

        let mut tera = Tera::default();
        tera.add_raw_template("header", HEADER_TEMPLATE)
            .context("Failed to parse header template")?;
        tera.add_raw_template("source", SOURCE_TEMPLATE)
            .context("Failed to parse source template")?;

        Ok(Self {
            config,
            base_dir,
            tera,
        })
    }

    /// Generate all artifacts (per-type headers + umbrella header +
    /// umbrella source + manifest).
    pub fn generate(&self) -> Result<GenerationReport> {
        let schema_path = self.base_dir.join(&self.config.schema);
        tracing::info!("Loading schema from: {:?}", schema_path);
        let schema = amqdef::loader::load_from_file(&schema_path)?;

        let generator = Generator::new(&schema)?;
        let artifacts = generator.generate()?;

        let mut report = GenerationReport::new();

        // Stage 1: per-type headers
        tracing::info!("Stage 1: Generating per-type headers");
        self.generate_type_headers(&artifacts, &mut report)?;

        // Stage 2: umbrella header + source
        tracing::info!("Stage 2: Generating umbrella artifacts");
        self.generate_umbrella(&artifacts, &mut report)?;

        // Stage 3: manifest
        tracing::info!("Stage 3: Generating manifest");
        self.generate_manifest(&report)?;

        tracing::info!("[OK] Generation complete");
        Ok(report)
    }

    fn render_header(&self, guard: &str, body: &str) -> Result<String> {
        let mut ctx = tera::Context::new();
        ctx.insert("guard", guard);
        ctx.insert("body", body.trim_end());
        self.tera
            .render("header", &ctx)
            .context(format!("Failed to render header for guard {}", guard))
    }

    fn generate_type_headers(
        &self,
        artifacts: &amqdef::Artifacts,
        report: &mut GenerationReport,
    ) -> Result<()> {
        let output_dir = self.base_dir.join(&self.config.output_dirs.headers);
        fs::create_dir_all(&output_dir).context("Failed to create headers directory")?;

        for artifact in &artifacts.per_type {
            let filename = format!("amqp_definitions_{}.h", artifact.type_name);
            let guard = format!("AMQP_DEFINITIONS_{}_H", artifact.type_name.to_uppercase());

            let rendered = self.render_header(&guard, &artifact.declarations)?;
            fs::write(output_dir.join(&filename), rendered)
                .context(format!("Failed to write {}", filename))?;

            report.headers_generated.push(filename);
        }

        tracing::info!(
            "[OK] Generated {} per-type headers",
            report.headers_generated.len()
        );
        Ok(())
    }

    fn generate_umbrella(
        &self,
        artifacts: &amqdef::Artifacts,
        report: &mut GenerationReport,
    ) -> Result<()> {
        let headers_dir = self.base_dir.join(&self.config.output_dirs.headers);
        let sources_dir = self.base_dir.join(&self.config.output_dirs.sources);
        fs::create_dir_all(&sources_dir).context("Failed to create sources directory")?;

        let umbrella_header = &self.config.umbrella.declarations;
        let rendered = self.render_header("AMQP_DEFINITIONS_H", &artifacts.umbrella_declarations)?;
        fs::write(headers_dir.join(umbrella_header), rendered)
            .context(format!("Failed to write {}", umbrella_header))?;
        report.headers_generated.push(umbrella_header.clone());

        let mut ctx = tera::Context::new();
        ctx.insert("umbrella_header", umbrella_header);
        ctx.insert("body", artifacts.umbrella_definitions.trim_end());
        let rendered = self
            .tera
            .render("source", &ctx)
            .context("Failed to render umbrella source")?;
        let umbrella_source = &self.config.umbrella.definitions;
        fs::write(sources_dir.join(umbrella_source), rendered)
            .context(format!("Failed to write {}", umbrella_source))?;
        report.sources_generated.push(umbrella_source.clone());

        tracing::info!("[OK] Generated umbrella artifacts");
        Ok(())
    }

    /// Generate manifest.json
    fn generate_manifest(&self, report: &GenerationReport) -> Result<()> {
        let manifest_path = self.base_dir.join(&self.config.manifest_output);
        if let Some(parent) = manifest_path.parent() {
            fs::create_dir_all(parent).context("Failed to create manifest directory")?;
        }

        let manifest = serde_json::json!({
            "generated_date": chrono::Local::now().to_rfc3339(),
            "schema": self.config.schema,
            "headers": report.headers_generated,
            "sources": report.sources_generated,
            "total_files": report.headers_generated.len() + report.sources_generated.len(),
        });

        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
            .context("Failed to write manifest.json")?;

        tracing::info!("[OK] Generated manifest.json");
        Ok(())
    }
}

/// Generation report
#[derive(Default)]
pub struct GenerationReport {
    pub headers_generated: Vec<String>,
    pub sources_generated: Vec<String>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) {
        println!("\n{}", "=".repeat(60));
        println!("  AMQP Definitions Generation Report");
        println!("{}", "=".repeat(60));
        println!();
        println!(
            "  [OK] Headers:         {} files",
            self.headers_generated.len()
        );
        println!(
            "  [OK] Sources:         {} files",
            self.sources_generated.len()
        );
        println!();
        println!("{}", "=".repeat(60));
    }
}
