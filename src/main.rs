// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! mmdiagram CLI entrypoint.
//!
//! Reads a diagram from a JSON file (`--file`) or from `NAME ORIGIN SIZE` triples
//! (`--regions`), then writes `<out>.png` and a markdown report next to it.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use mmdiagram::format::{diagram_from_regions, diagram_schema_json, load_diagram_file, parse_region_tuples};
use mmdiagram::layout::{compose_diagram, layout_diagram};
use mmdiagram::model::diagram::{DEFAULT_DIAGRAM_NAME, DEFAULT_PIXEL_HEIGHT, DEFAULT_PIXEL_WIDTH};
use mmdiagram::model::{parse_address, Diagram, DiagramBuilder, DuplicateRegionPolicy, IndentScheme, RawAddress};
use mmdiagram::render::{render_markdown, render_raster, render_unicode, write_png, ColourAllocator};

const DEFAULT_OUT: &str = "map.png";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} -f <diagram.json> [-o <out.png>] [--seed <n>] [--text]\n  {program} -r NAME ORIGIN SIZE [NAME ORIGIN SIZE ...] [-n <name>] [-l <max-address>]\n      [-W <width>] [-H <height>] [-v <void-threshold>] [--indent linear|alternate|inline]\n      [--duplicates reject|skip] [-o <out.png>] [--seed <n>] [--text]\n  {program} --schema\n\nExactly one of --file/--regions is required. Addresses accept decimal or 0x hexadecimal.\nThe diagram options -n -l -W -H -v --indent --duplicates apply to --regions only;\na --file diagram carries its own.\n\nWrites <out>.png (default {DEFAULT_OUT}) and <out>.md. --text also prints a text preview.\n--seed fixes the region colours. --schema prints the JSON schema of --file input."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    file: Option<String>,
    regions: Option<Vec<String>>,
    limit: Option<String>,
    name: Option<String>,
    out: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    void_threshold: Option<u64>,
    indent: Option<IndentScheme>,
    duplicates: Option<DuplicateRegionPolicy>,
    seed: Option<u64>,
    text: bool,
    schema: bool,
}

impl CliOptions {
    fn has_region_options(&self) -> bool {
        self.name.is_some()
            || self.limit.is_some()
            || self.width.is_some()
            || self.height.is_some()
            || self.void_threshold.is_some()
            || self.indent.is_some()
            || self.duplicates.is_some()
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value);
    Ok(())
}

fn parse_options(args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut args = args.peekable();
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-f" | "--file" => set_once(&mut options.file, args.next().ok_or(())?)?,
            "-r" | "--regions" => {
                let mut values = Vec::new();
                while let Some(value) = args.next_if(|next| !next.starts_with('-')) {
                    values.push(value);
                }
                if values.is_empty() || values.len() % 3 != 0 {
                    return Err(());
                }
                set_once(&mut options.regions, values)?;
            }
            "-l" | "--limit" => set_once(&mut options.limit, args.next().ok_or(())?)?,
            "-n" | "--name" => set_once(&mut options.name, args.next().ok_or(())?)?,
            "-o" | "--out" => set_once(&mut options.out, args.next().ok_or(())?)?,
            "-W" | "--width" => {
                let width = args.next().ok_or(())?.parse().map_err(|_| ())?;
                set_once(&mut options.width, width)?;
            }
            "-H" | "--height" => {
                let height = args.next().ok_or(())?.parse().map_err(|_| ())?;
                set_once(&mut options.height, height)?;
            }
            "-v" | "--void" => {
                let threshold = parse_address(&args.next().ok_or(())?).map_err(|_| ())?;
                set_once(&mut options.void_threshold, threshold)?;
            }
            "--indent" => {
                let scheme = args.next().ok_or(())?.parse().map_err(|_| ())?;
                set_once(&mut options.indent, scheme)?;
            }
            "--duplicates" => {
                let policy = args.next().ok_or(())?.parse().map_err(|_| ())?;
                set_once(&mut options.duplicates, policy)?;
            }
            "--seed" => {
                let seed = args.next().ok_or(())?.parse().map_err(|_| ())?;
                set_once(&mut options.seed, seed)?;
            }
            "--text" => {
                if options.text {
                    return Err(());
                }
                options.text = true;
            }
            "--schema" => {
                if options.schema {
                    return Err(());
                }
                options.schema = true;
            }
            _ => return Err(()),
        }
    }

    if options.schema {
        if options.file.is_some() || options.regions.is_some() {
            return Err(());
        }
        return Ok(options);
    }

    if options.file.is_some() == options.regions.is_some() {
        return Err(());
    }

    if options.file.is_some() && options.has_region_options() {
        return Err(());
    }

    if let Some(out) = &options.out {
        let is_png = Path::new(out)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            return Err(());
        }
    }

    Ok(options)
}

fn load_diagram(options: &CliOptions) -> Result<Diagram, Box<dyn Error>> {
    if let Some(path) = &options.file {
        return Ok(load_diagram_file(path)?);
    }

    let regions = parse_region_tuples(options.regions.as_deref().unwrap_or_default())?;
    let name = options.name.as_deref().unwrap_or(DEFAULT_DIAGRAM_NAME);

    let mut builder = DiagramBuilder::new(name)
        .pixel_size(
            options.width.unwrap_or(DEFAULT_PIXEL_WIDTH),
            options.height.unwrap_or(DEFAULT_PIXEL_HEIGHT),
        )
        .indent_scheme(options.indent.unwrap_or_default())
        .duplicate_policy(options.duplicates.unwrap_or_default());
    if let Some(threshold) = options.void_threshold {
        builder = builder.void_threshold(threshold);
    }

    let limit = options.limit.clone().map(RawAddress::Text);
    Ok(diagram_from_regions(builder, name, limit, regions)?)
}

fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    if options.schema {
        println!("{}", diagram_schema_json()?);
        return Ok(());
    }

    let diagram = load_diagram(&options)?;
    let layout = layout_diagram(&diagram);

    if options.text {
        print!("{}", render_unicode(&layout)?);
    }

    let composition = compose_diagram(&layout);
    let mut colours = match options.seed {
        Some(seed) => ColourAllocator::seeded(seed),
        None => ColourAllocator::from_entropy(),
    };
    let image = render_raster(&composition, &mut colours)?;

    let png = PathBuf::from(options.out.as_deref().unwrap_or(DEFAULT_OUT));
    write_png(&image, &png)?;

    let report = png.with_extension("md");
    let image_ref = png
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    fs::write(&report, render_markdown(&layout, &image_ref))
        .map_err(|err| format!("io error at {report:?}: {err}"))?;

    tracing::info!(png = %png.display(), report = %report.display(), "diagram written");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "mmdiagram".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    if let Err(err) = run(options) {
        eprintln!("mmdiagram: {err}");
        std::process::exit(1);
    }
}
