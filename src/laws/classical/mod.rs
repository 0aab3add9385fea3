pub mod coulomb;

pub use coulomb::Coulomb;
