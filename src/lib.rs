//! Case Intake - Conversational homicide case intake
//!
//! This crate walks an investigator through a fixed sequence of questions,
//! validates and normalizes each answer, and hands the completed case to a
//! language model for analysis.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
