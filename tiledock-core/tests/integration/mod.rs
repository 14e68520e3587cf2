mod container_scenarios;
mod file_store_roundtrip;
