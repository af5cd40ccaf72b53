//! Core data models for the crate
//!
//! This module contains the primary data structures used throughout the
//! crate, separated from the logic that operates on them.

pub mod profile;

pub use profile::{
    GroupId, Profile, ProfileId, ProxyKind, ProxyParams, ShadowsocksParams, SocksParams,
    VMessParams,
};
