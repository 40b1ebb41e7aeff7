//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in ads1x15-core on top of the ads1x15-hal bus traits:
//!
//! - ADS1015 / ADS1115 single-shot and comparator driver
//! - Sentinel-returning compatibility API

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod adc;

pub use adc::Ads1x15;
