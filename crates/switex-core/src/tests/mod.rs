mod mapping_invariants_tests;
mod persian_tests;
