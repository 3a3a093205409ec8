//! Application services orchestrating domain and infrastructure.

pub mod seeder;

pub use seeder::Seeder;
