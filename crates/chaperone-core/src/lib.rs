//! # chaperone-core
//!
//! Ownership reconciliation primitives for the chaperone entrypoint wrapper.
//!
//! This crate provides:
//! - **Ownership**: the [`owner::OwnershipSetter`] capability, its real
//!   filesystem implementation, and a read-only ownership inspection.
//! - **Reconciliation**: the bounded best-effort loop that re-applies
//!   ownership on a fixed schedule and swallows every attempt failure.
//! - **Hand-off**: replacement of the current process image with the
//!   container's primary workload.
//!
//! All uid/gid syscalls are confined to [`owner`]; the loop itself depends
//! only on the capability trait and is testable without privileges.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod exec;
pub mod owner;
pub mod reconcile;
