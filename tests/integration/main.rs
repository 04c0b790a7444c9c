//! Integration tests for h5ep

mod helpers;

mod view_test;
