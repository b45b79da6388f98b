//! # textree
//!
//! A priority-driven tree builder for multilevel text documents.
//!
//! Given a flat stream of classified lines — each a (level kind, content,
//! attributes) triple — textree reconstructs the nested document tree and
//! serializes it to a markup format. Level kinds are ordered by an integer
//! priority (lower means closer to the document root); the builder resolves
//! the parent of every new node against an explicit active stack, so missing
//! intermediate levels self-heal by attaching to the nearest valid ancestor.
//!
//! See the [textree module](crate::textree) for the component layout.

pub mod textree;
