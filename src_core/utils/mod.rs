pub use self::physics::*;

mod physics;
