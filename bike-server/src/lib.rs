//! Bike-share station finder service.
//!
//! A conversational backend that answers: "where is the closest
//! bike-share station to my home with bikes available?" The home
//! address is collected over several conversational turns, geocoded,
//! and persisted together with its precomputed nearest stations.

pub mod config;
pub mod dialogue;
pub mod domain;
pub mod feed;
pub mod geo;
pub mod geocode;
pub mod handler;
pub mod locale;
pub mod ranking;
pub mod select;
pub mod session;
pub mod speech;
pub mod storage;
pub mod web;
