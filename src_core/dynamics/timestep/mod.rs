pub use self::elasticity_sound_speed_timestep_bound::ElasticitySoundSpeedTimestepBound;

mod elasticity_sound_speed_timestep_bound;
