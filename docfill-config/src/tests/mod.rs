//! Integration tests for the Docfill configuration system
