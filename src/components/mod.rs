//! UI components.

pub mod skill_graph;
pub mod skill_network;
