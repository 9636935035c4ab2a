//! # Roomplan Core
//!
//! Core types, traits, and utilities for the Roomplan layout engine.
//! Provides unit conversion, geometry primitives, the scene event bus,
//! and the service interfaces the engine consumes (furniture catalog,
//! asset store).

pub mod error;
pub mod event_bus;
pub mod geometry;
pub mod services;
pub mod units;

pub use error::{AssetError, CatalogError, DocumentError, Error, Result, StoreError};

pub use geometry::{wrap_radians, Color, EulerRotation, Footprint, Point3, Rect2, Size3};

pub use units::{to_meters, Unit};

// Re-export event bus for convenience
pub use event_bus::{EventBus, EventCategory, EventFilter, SceneEvent, SubscriptionId};

pub use services::{
    AssetRef, AssetStore, CatalogFilter, CatalogProvider, ModelData, TextureData, TextureSettings,
    WrapMode,
};
