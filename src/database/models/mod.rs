pub mod gratitude;
