//! ECS surface of the diorama: generation requests in, summaries out.

use bevy::prelude::*;
use hexx::Hex;

use super::Diorama;
use crate::terrain::GenerationSummary;

/// Request to generate terrain around `center`.
#[derive(Message, Clone, Debug)]
pub struct GenerateTerrain {
    /// Center hex of the generated disk.
    pub center: Hex,
    /// Disk radius; `None` uses the configured default.
    pub radius: Option<u32>,
    /// Fixed seed for a reproducible result; `None` draws one.
    pub seed: Option<u64>,
}

/// Emitted after a generation was merged into the stores.
#[derive(Message, Clone, Debug)]
pub struct TerrainGenerated {
    /// What was generated.
    pub summary: GenerationSummary,
}

/// Runs every pending [`GenerateTerrain`] request in arrival order.
///
/// Failed requests are logged by the diorama and produce no message.
pub fn handle_generation_requests(
    mut requests: MessageReader<GenerateTerrain>,
    mut diorama: ResMut<Diorama>,
    mut generated: MessageWriter<TerrainGenerated>,
) {
    for request in requests.read() {
        let radius = request
            .radius
            .unwrap_or(diorama.config().generation.default_radius);
        let summary = match request.seed {
            Some(seed) => diorama.generate_terrain_seeded(request.center, radius, seed),
            None => diorama.generate_terrain(request.center, radius),
        };
        if let Some(summary) = summary {
            generated.write(TerrainGenerated { summary });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diorama::{DioramaConfig, DioramaPlugin};
    use bevy::ecs::message::Messages;

    #[test]
    fn plugin_handles_generation_messages() {
        let mut app = App::new();
        app.add_plugins(DioramaPlugin(DioramaConfig::default()));

        app.world_mut().write_message(GenerateTerrain {
            center: Hex::ZERO,
            radius: Some(3),
            seed: Some(10),
        });
        app.world_mut().write_message(GenerateTerrain {
            center: Hex::new(20, 0),
            radius: Some(99),
            seed: None,
        });
        app.update();

        let diorama = app.world().resource::<Diorama>();
        assert_eq!(diorama.tiles().hex_count(), 37);

        let messages = app.world().resource::<Messages<TerrainGenerated>>();
        let summaries: Vec<&TerrainGenerated> = messages.iter_current_update_messages().collect();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].summary.seed, 10);
    }
}
