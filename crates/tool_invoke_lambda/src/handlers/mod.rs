pub mod maps_directions;
