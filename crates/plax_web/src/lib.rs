//! Browser bindings for the plax parallax engine
//!
//! Wires a [`plax_core::ParallaxController`] to the real DOM: passive
//! scroll and resize listeners on the window, `requestAnimationFrame`
//! scheduling, and element views over outer/inner node pairs.
//!
//! The DOM modules are gated on `target_arch = "wasm32"`; on other targets
//! the crate exposes only its error type.
//!
//! # Example
//!
//! ```ignore
//! use plax_core::{ElementConfig, Offset};
//! use plax_web::DomParallax;
//!
//! let parallax = DomParallax::attach()?;
//! let config = ElementConfig::new()
//!     .offset_y(Offset::percent(-20.0), Offset::percent(20.0));
//! let id = parallax.create_element(config, outer_node, inner_node)?;
//!
//! // ... later
//! parallax.remove_element(id);
//! parallax.destroy();
//! ```

pub mod error;

pub use error::DomError;

#[cfg(target_arch = "wasm32")]
mod binding;
#[cfg(target_arch = "wasm32")]
mod element;
#[cfg(target_arch = "wasm32")]
mod scheduler;

#[cfg(target_arch = "wasm32")]
pub use binding::DomParallax;
#[cfg(target_arch = "wasm32")]
pub use element::DomElementView;
#[cfg(target_arch = "wasm32")]
pub use scheduler::RafScheduler;
