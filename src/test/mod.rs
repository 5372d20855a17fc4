//! Cross-structure tests exercising every index through the shared contract.
