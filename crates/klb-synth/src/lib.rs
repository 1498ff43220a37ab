//! klb-synth: DNS record synthesis for multi-cluster gateways.
//!
//! Given one gateway's addresses and labels, a [`RoutingPolicy`] and the
//! previously published records, [`EndpointSynthesizer`] produces the record
//! set that should replace them.
//!
//! # Geo-weighted layout
//!
//! ```text
//! www.example.com            CNAME  klb.www.example.com
//! klb.www.example.com        CNAME  ie.klb.www.example.com        (geo IE)
//! klb.www.example.com        CNAME  ie.klb.www.example.com        (geo *, default)
//! ie.klb.www.example.com     CNAME  2q5hyv-oe3k96.klb.www...      (weight 120)
//! ie.klb.www.example.com     CNAME  edge.example.net              (weight 120)
//! 2q5hyv-oe3k96.klb.www...   A      192.0.2.1 192.0.2.2
//! ```
//!
//! Records whose identity (name + set identifier) already exists in the
//! previous set are updated in place, so metadata attached by other
//! collaborators survives recomputation. Output is always sorted by identity.
//!
//! Synthesis is pure: no I/O, no locks, no shared state.

pub mod chain;
pub mod error;
pub mod merge;
pub mod order;
pub mod shortcode;
pub mod synthesizer;

pub use error::{SynthesisError, SynthesisResult};
pub use klb_policy::RoutingPolicy;
pub use merge::RecordMerger;
pub use synthesizer::{EndpointSynthesizer, SynthesisRequest, synthesize, synthesize_config};
