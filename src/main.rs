//! Headless diorama generator.
//!
//! Generates one terrain patch, then logs the generation summary, the region
//! analysis and the placement suggestions at its center before exiting.

use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use hex_diorama::diorama::{GenerateTerrain, TerrainGenerated, handle_generation_requests};
use hex_diorama::{Diorama, DioramaConfig, DioramaPlugin};
use hexx::Hex;

/// Command-line overrides for the generated patch.
#[cfg(feature = "native")]
#[derive(clap::Parser, Debug)]
#[command(version, about = "Generate a hex tabletop diorama")]
struct Cli {
    /// Generation seed; drawn from the default seed when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Terrain preset id (forest, plains, hills, mountains, swamp).
    #[arg(long)]
    preset: Option<String>,
    /// Generation radius in hexes.
    #[arg(long)]
    radius: Option<u32>,
    /// Axial q of the center hex.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    q: i32,
    /// Axial r of the center hex.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    r: i32,
}

/// The single request issued at startup.
#[derive(Resource)]
struct StartupRequest(GenerateTerrain);

fn main() -> AppExit {
    let (config, request) = configure();

    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_plugins(DioramaPlugin(config))
        .insert_resource(StartupRequest(request))
        .add_systems(Startup, send_startup_request)
        .add_systems(Update, report_and_exit.after(handle_generation_requests))
        .run()
}

#[cfg(feature = "native")]
fn configure() -> (DioramaConfig, GenerateTerrain) {
    use clap::Parser;

    let cli = Cli::parse();
    let mut config = DioramaConfig::default();
    if let Some(preset) = cli.preset {
        config.generation.preset = preset;
    }
    let request = GenerateTerrain {
        center: Hex::new(cli.q, cli.r),
        radius: cli.radius,
        seed: cli.seed,
    };
    (config, request)
}

#[cfg(not(feature = "native"))]
fn configure() -> (DioramaConfig, GenerateTerrain) {
    let request = GenerateTerrain {
        center: Hex::ZERO,
        radius: None,
        seed: None,
    };
    (DioramaConfig::default(), request)
}

fn send_startup_request(request: Res<StartupRequest>, mut out: MessageWriter<GenerateTerrain>) {
    out.write(request.0.clone());
}

/// Logs what was generated and quits; exits with an error if nothing was.
fn report_and_exit(
    mut generated: MessageReader<TerrainGenerated>,
    diorama: Res<Diorama>,
    mut exit: MessageWriter<AppExit>,
) {
    let mut any = false;
    for message in generated.read() {
        any = true;
        let s = &message.summary;
        if let Some(top) = diorama.tiles_at(s.center).last() {
            info!(
                "center surface: {} at height {}",
                top.kind.as_str(),
                diorama.total_height_at(s.center)
            );
        }
        let analysis = diorama.analyze_region(s.center, s.radius);
        info!(
            "terrain {:?}: variance {:.2}, connectivity {:.2}, density {:.2}, mean height {:.2}",
            analysis.terrain_kind,
            analysis.height_variance,
            analysis.connectivity,
            analysis.asset_density,
            analysis.average_height
        );
        for action in &analysis.recommended_actions {
            info!("recommended: {action}");
        }
        for suggestion in diorama.placement_suggestions(s.center) {
            info!(
                "suggest {} at ({}, {}) [{:.2}]: {}",
                suggestion.asset_type,
                suggestion.hex.x,
                suggestion.hex.y,
                suggestion.confidence,
                suggestion.reason
            );
        }
    }
    exit.write(if any { AppExit::Success } else { AppExit::error() });
}
