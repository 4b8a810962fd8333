//! Command-line handling
//!
//! Parses the arguments into an [`AppSettings`], which then drives a [`TreeGenerator`] over the
//! in-memory kernel and writes whichever outputs were requested. The defaults mirror the tuned
//! slider defaults of the tool: a 15-unit trunk with 10 subdivisions, 15 twigs, 20 leaves each.

use clap::{App, Arg, ArgMatches};
use eyre::{eyre, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::process::exit;
use std::str::FromStr;

use crate::gen::{Settings, TreeGenerator};
use crate::img::ImageConfig;
use crate::kernel::{MeshKernel, SceneKernel};
use crate::scene::SceneState;
use crate::Float;

/// Everything gathered from the command line, ready to run
struct AppSettings<'cli> {
    height: Float,
    height_subdivs: usize,
    twig_count: usize,
    leaf_count: usize,
    seed: Option<u64>,
    settings: Settings,
    json_out: Option<&'cli Path>,
    png_out: Option<&'cli Path>,
}

/// Parses the command line and runs the generator, exiting on failure
pub fn run() {
    let matches = App::new("branchgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Procedurally generates a tree branch with twigs and leaves")
        .arg(
            Arg::with_name("height")
                .long("height")
                .help("Height of the trunk")
                .takes_value(true)
                .default_value("15"),
        )
        .arg(
            Arg::with_name("subdivisions")
                .long("subdivisions")
                .short("s")
                .help("Number of height subdivisions on the trunk")
                .takes_value(true)
                .default_value("10"),
        )
        .arg(
            Arg::with_name("twigs")
                .long("twigs")
                .short("t")
                .help("Number of twigs to scatter onto the trunk")
                .takes_value(true)
                .default_value("15"),
        )
        .arg(
            Arg::with_name("leaves")
                .long("leaves")
                .short("l")
                .help("Number of leaves to scatter onto each twig")
                .takes_value(true)
                .default_value("20"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .help("Seed for the random source, for reproducible output")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .help("JSON file overriding the generation tuning ranges")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Write a JSON description of the generated scene to this path")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("png")
                .long("png")
                .help("Write a side-view PNG snapshot of the generated scene to this path")
                .takes_value(true),
        )
        .get_matches();

    let app = AppSettings::from_matches(&matches).unwrap_or_else(|e| {
        eprintln!("{:?}", e.wrap_err("failed to read arguments"));
        exit(1)
    });

    app.run().unwrap_or_else(|e| {
        eprintln!("{:?}", e);
        exit(1)
    });
}

/// Parses one argument value, attaching the argument name to any error
fn parse_arg<T>(matches: &ArgMatches, name: &str) -> eyre::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match matches.value_of(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| eyre!("invalid value for `--{}`: {}", name, e)),
    }
}

impl<'cli> AppSettings<'cli> {
    fn from_matches(matches: &'cli ArgMatches) -> eyre::Result<Self> {
        let settings = match matches.value_of("config") {
            Some(path) => Settings::from_file(Path::new(path))
                .wrap_err_with(|| format!("failed to load settings from {}", path))?,
            None => Settings::default(),
        };

        // the defaults make these always present; the fallbacks are just for completeness
        Ok(AppSettings {
            height: parse_arg(matches, "height")?.unwrap_or(15.0),
            height_subdivs: parse_arg(matches, "subdivisions")?.unwrap_or(10),
            twig_count: parse_arg(matches, "twigs")?.unwrap_or(15),
            leaf_count: parse_arg(matches, "leaves")?.unwrap_or(20),
            seed: parse_arg(matches, "seed")?,
            settings,
            json_out: matches.value_of("json").map(Path::new),
            png_out: matches.value_of("png").map(Path::new),
        })
    }

    /// Runs the full generation pipeline and writes the requested outputs
    fn run(&self) -> eyre::Result<()> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut gen = TreeGenerator::new(SceneKernel::new(), rng, self.settings.clone());
        gen.generate_all(
            self.height,
            self.height_subdivs,
            self.twig_count,
            self.leaf_count,
        )
        .wrap_err("failed to generate tree")?;

        println!(
            "generated 1 branch, {} twigs, {} leaves",
            gen.scene().twig_handles().len(),
            gen.scene().leaf_handles().len(),
        );

        if let Some(path) = self.json_out {
            let summary = SceneSummary::collect(gen.kernel(), gen.scene())
                .wrap_err("failed to summarize scene")?;
            let contents =
                serde_json::to_string_pretty(&summary).wrap_err("failed to serialize scene")?;
            fs::write(path, contents)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            println!("wrote scene description to {}", path.display());
        }

        if let Some(path) = self.png_out {
            let image = ImageConfig::default()
                .make_image(gen.kernel(), gen.scene())
                .wrap_err("failed to draw scene")?;
            image
                .save(path)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            println!("wrote snapshot to {}", path.display());
        }

        Ok(())
    }
}

/// JSON-facing view of the generated scene
#[derive(Debug, Serialize)]
struct SceneSummary {
    branch: Option<BranchSummary>,
    twig_count: usize,
    leaf_count: usize,
}

#[derive(Debug, Serialize)]
struct BranchSummary {
    height_subdivs: usize,
    radius: Float,
    centerline: Vec<[Float; 3]>,
    twigs: Vec<TwigSummary>,
}

#[derive(Debug, Serialize)]
struct TwigSummary {
    /// Which trunk centerline loop the twig is anchored at
    anchor: usize,
    radius: Float,
    leaf_count: usize,
}

impl SceneSummary {
    fn collect<K: MeshKernel>(kernel: &K, state: &SceneState) -> eyre::Result<Self> {
        let branch = match state.branch() {
            None => None,
            Some(branch) => Some(BranchSummary {
                height_subdivs: branch.height_subdivs,
                radius: kernel.radius(branch.mesh)?,
                centerline: branch
                    .centerline
                    .iter()
                    .map(|p| [p.pos.x, p.pos.y, p.pos.z])
                    .collect(),
                twigs: branch
                    .twigs
                    .iter()
                    .map(|twig| TwigSummary {
                        anchor: twig.anchor,
                        radius: twig.radius,
                        leaf_count: twig.leaves.len(),
                    })
                    .collect(),
            }),
        };

        Ok(SceneSummary {
            branch,
            twig_count: state.twig_handles().len(),
            leaf_count: state.leaf_handles().len(),
        })
    }
}
