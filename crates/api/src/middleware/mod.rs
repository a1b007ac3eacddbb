pub mod legacy_status;
