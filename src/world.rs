//! World state: generated terrain, its render batches and the player
//!
//! Generation runs once, synchronously, before the first tick. Each tick reads
//! input, moves the player against the grass batch, applies any break
//! request to both the store and the batch, then pushes the camera.

use log::info;

use crate::core::input::InputState;
use crate::core::{Error, Result};
use crate::player::{GroundedMovementController, PlayerKinematics, TickOutcome};
use crate::render::{BatchHandle, RenderAdapter};
use crate::scene::SceneConfig;
use crate::terrain::{GeneratedTerrain, NoiseField, TerrainGenerator, TerrainParameters};
use crate::voxel::{Voxel, VoxelCategory};

/// Render batch per category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchHandles {
    pub stone: BatchHandle,
    pub grass: BatchHandle,
    pub water: BatchHandle,
}

impl BatchHandles {
    pub fn get(&self, category: VoxelCategory) -> BatchHandle {
        match category {
            VoxelCategory::Stone => self.stone,
            VoxelCategory::Grass => self.grass,
            VoxelCategory::Water => self.water,
        }
    }
}

/// One session's world, owning stores, renderer and player
pub struct WorldState<R: RenderAdapter> {
    params: TerrainParameters,
    terrain: GeneratedTerrain,
    batches: BatchHandles,
    renderer: R,
    controller: GroundedMovementController,
}

impl<R: RenderAdapter> WorldState<R> {
    /// Validate `config`, generate terrain from `noise`, build batches and spawn the player.
    ///
    /// Nothing is built if validation fails.
    pub fn generate(config: &SceneConfig, noise: &impl NoiseField, renderer: R) -> Result<Self> {
        config.validate()?;
        let terrain = TerrainGenerator::new(config.terrain.clone())?.generate(noise);
        Self::from_terrain(config, terrain, renderer)
    }

    /// Wrap already generated (or hand-built) terrain
    pub fn from_terrain(
        config: &SceneConfig,
        terrain: GeneratedTerrain,
        mut renderer: R,
    ) -> Result<Self> {
        config.validate()?;
        let params = config.terrain.clone();
        let cube_size = params.cube_size;

        let mut build = |category: VoxelCategory| {
            renderer.build_batch(category, terrain.store(category).as_slice(), cube_size)
        };
        let batches = BatchHandles {
            stone: build(VoxelCategory::Stone),
            grass: build(VoxelCategory::Grass),
            water: build(VoxelCategory::Water),
        };

        let spawn = params.spawn_position();
        let controller = GroundedMovementController::new(config.movement.clone(), cube_size, spawn);
        renderer.update_camera(spawn, controller.view_direction());

        info!(
            "World ready: {} voxels in 3 batches, player spawned at {:?}",
            terrain.total_count(),
            spawn
        );

        Ok(Self {
            params,
            terrain,
            batches,
            renderer,
            controller,
        })
    }

    /// Run one frame: movement, grounding, optional break, camera update.
    pub fn tick(&mut self, input: &mut InputState, delta: f32) -> Result<TickOutcome> {
        let outcome = self
            .controller
            .update(input, delta, &self.renderer, self.batches.grass);

        if let Some(hit) = outcome.break_target {
            self.break_block(VoxelCategory::Grass, hit.instance_index)?;
        }

        let eye = self.controller.kinematics().position;
        self.renderer.update_camera(eye, self.controller.view_direction());
        Ok(outcome)
    }

    /// Remove instance `index` of `category` from the store and its batch.
    ///
    /// Swap-remove on both sides keeps indices aligned. The batch goes first
    /// so a renderer error leaves both untouched. Grounding is not rechecked
    /// until the next tick.
    pub fn break_block(&mut self, category: VoxelCategory, index: usize) -> Result<Voxel> {
        let len = self.terrain.store(category).len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.renderer.remove_instance(self.batches.get(category), index)?;
        let voxel = self.terrain.store_mut(category).remove(index)?;
        info!("Broke {} voxel at {:?}", category, voxel.position);
        Ok(voxel)
    }

    pub fn params(&self) -> &TerrainParameters {
        &self.params
    }

    pub fn terrain(&self) -> &GeneratedTerrain {
        &self.terrain
    }

    pub fn batches(&self) -> BatchHandles {
        self.batches
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn controller(&self) -> &GroundedMovementController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GroundedMovementController {
        &mut self.controller
    }

    pub fn player(&self) -> &PlayerKinematics {
        self.controller.kinematics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::math::Ray;
    use crate::render::RayHit;
    use crate::render::InstancedBatches;
    use crate::terrain::{ConstantField, PerlinField};
    use crate::voxel::VoxelInstanceStore;

    const DT: f32 = 1.0 / 60.0;

    fn small_config() -> SceneConfig {
        let mut config = SceneConfig::default();
        config.terrain.plane_size = 12;
        config
    }

    fn flat_world(config: &SceneConfig) -> WorldState<InstancedBatches> {
        WorldState::generate(config, &ConstantField::new(0.0), InstancedBatches::new()).unwrap()
    }

    #[test]
    fn test_generate_builds_all_batches() {
        let config = small_config();
        let noise = PerlinField::new(config.terrain.seed);
        let world = WorldState::generate(&config, &noise, InstancedBatches::new()).unwrap();

        let renderer = world.renderer();
        for category in VoxelCategory::ALL {
            let batch = renderer.batch(world.batches().get(category)).unwrap();
            assert_eq!(batch.category(), category);
            assert_eq!(batch.len(), world.terrain().store(category).len());
        }
        assert_eq!(world.terrain().stone.len(), 144);
        assert_eq!(world.player().position, config.terrain.spawn_position());
        assert_eq!(renderer.camera().unwrap().eye, config.terrain.spawn_position());
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let mut config = small_config();
        config.terrain.water_level = -1;
        let noise = ConstantField::new(0.0);
        let result = WorldState::generate(&config, &noise, InstancedBatches::new());
        assert!(matches!(result, Err(Error::InvalidParameters(_))));
    }

    #[test]
    fn test_player_settles_on_terrain() {
        let config = small_config();
        let mut world = flat_world(&config);
        let mut input = InputState::new();

        let mut landed = false;
        for _ in 0..600 {
            landed |= world.tick(&mut input, DT).unwrap().landed;
        }

        // Flat height 5: grass tops out at y = 4.5
        let player = world.player();
        assert!(landed);
        assert!(player.grounded);
        assert!(player.velocity.y >= 0.0);
        assert!(player.position.y > 4.5 && player.position.y <= 5.5);
    }

    #[test]
    fn test_break_request_swap_removes_grass() {
        // Ten grass voxels in a row ahead of the player along -Z; index 5 sits at z = -3
        let mut grass = VoxelInstanceStore::new(VoxelCategory::Grass);
        let order = [-8, -7, -6, -5, -4, -3, -9, -10, -11, -12];
        for z in order {
            grass.append(Voxel::new(0, 6, z));
        }
        let terrain = GeneratedTerrain {
            stone: VoxelInstanceStore::new(VoxelCategory::Stone),
            grass,
            water: VoxelInstanceStore::new(VoxelCategory::Water),
        };
        let mut config = small_config();
        config.movement.fly_enabled = true;
        let mut world =
            WorldState::from_terrain(&config, terrain, InstancedBatches::new()).unwrap();
        world.controller_mut().kinematics_mut().position = Vec3::new(0.0, 6.0, 0.0);

        let mut input = InputState::new();
        input.request_break();
        let outcome = world.tick(&mut input, DT).unwrap();

        assert_eq!(outcome.break_target.unwrap().instance_index, 5);
        let store = &world.terrain().grass;
        assert_eq!(store.len(), 9);
        assert_eq!(store.at(5), Some(&Voxel::new(0, 6, -12)));
        assert_eq!(store.position_of(&Voxel::new(0, 6, -3)), None);

        let batch = world.renderer().batch(world.batches().grass).unwrap();
        assert_eq!(batch.len(), 9);
        assert_eq!(batch.instances()[5].translation, [0.0, 6.0, -12.0]);
    }

    #[test]
    fn test_break_block_out_of_range() {
        let config = small_config();
        let mut world = flat_world(&config);
        let len = world.terrain().grass.len();

        let result = world.break_block(VoxelCategory::Grass, len);
        assert!(matches!(result, Err(Error::IndexOutOfRange { .. })));
        assert_eq!(world.terrain().grass.len(), len);
    }

    /// Builds batches but refuses every removal
    #[derive(Default)]
    struct RejectingRenderer {
        built: Vec<usize>,
    }

    impl RenderAdapter for RejectingRenderer {
        fn build_batch(
            &mut self,
            _category: VoxelCategory,
            voxels: &[Voxel],
            _cube_size: f32,
        ) -> BatchHandle {
            self.built.push(voxels.len());
            BatchHandle(self.built.len() as u32 - 1)
        }

        fn remove_instance(&mut self, handle: BatchHandle, _index: usize) -> Result<()> {
            Err(Error::UnknownBatch(handle))
        }

        fn cast_ray(&self, _ray: &Ray, _max: f32, _handle: BatchHandle) -> Option<RayHit> {
            None
        }
    }

    #[test]
    fn test_renderer_error_leaves_store_intact() {
        let config = small_config();
        let noise = ConstantField::new(0.0);
        let mut world =
            WorldState::generate(&config, &noise, RejectingRenderer::default()).unwrap();
        let before = world.terrain().grass.len();
        let first = *world.terrain().grass.at(0).unwrap();

        let result = world.break_block(VoxelCategory::Grass, 0);
        assert!(matches!(result, Err(Error::UnknownBatch(_))));
        assert_eq!(world.terrain().grass.len(), before);
        assert_eq!(world.terrain().grass.at(0), Some(&first));
        assert_eq!(world.renderer().built[world.batches().grass.0 as usize], before);
    }

    #[test]
    fn test_store_and_batch_stay_aligned() {
        let config = small_config();
        let mut world =
            WorldState::generate(&config, &PerlinField::new(9), InstancedBatches::new()).unwrap();

        for index in [0, 17, 3, 40] {
            world.break_block(VoxelCategory::Grass, index).unwrap();
        }
        if !world.terrain().water.is_empty() {
            world.break_block(VoxelCategory::Water, 0).unwrap();
        }

        let cube = world.params().cube_size;
        for category in VoxelCategory::ALL {
            let store = world.terrain().store(category);
            let batch = world.renderer().batch(world.batches().get(category)).unwrap();
            assert_eq!(store.len(), batch.len());
            for (voxel, raw) in store.iter().zip(batch.instances()) {
                assert_eq!(voxel.world_center(cube).to_array(), raw.translation);
            }
        }
    }

    #[test]
    fn test_player_falls_after_breaking_block_underfoot() {
        let config = small_config();
        let mut world = flat_world(&config);
        let mut input = InputState::new();
        for _ in 0..600 {
            world.tick(&mut input, DT).unwrap();
        }
        assert!(world.player().grounded);

        // Centre over column (5, 5), look down and break its top
        let player = world.controller_mut().kinematics_mut();
        player.position.x = 5.0;
        player.position.z = 5.0;
        world.controller_mut().set_orientation(0.0, -1.5);
        input.request_break();
        let outcome = world.tick(&mut input, DT).unwrap();
        let hit = outcome.break_target.unwrap();
        assert!(hit.distance < 1.5);
        assert_eq!(world.terrain().grass.position_of(&Voxel::new(5, 4, 5)), None);

        let outcome = world.tick(&mut input, DT).unwrap();
        assert!(!outcome.grounded);
        assert!(world.player().velocity.y < 0.0);
    }
}
