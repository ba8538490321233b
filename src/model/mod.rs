pub mod cascade;
pub mod data_core;
pub mod id_gen;
pub mod sample;
pub mod schema;
pub mod shadow_tree;
pub mod tree_ops;
