// Parser tests
mod parsing;


mod list_queries;
mod non_ground_queries;
mod rule_resolution;

// Engine and output tests
mod engine;
