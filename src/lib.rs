//! Sliceline: order-placement backend.
//!
//! Layered hexagonally: `domain` holds entities, ports, and the services
//! that enforce the business rules; `application` wraps them in use cases;
//! `infrastructure` provides the Postgres store, security primitives,
//! metrics, and the order-verification client; `adapters::http` is the
//! thin actix-web surface.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
