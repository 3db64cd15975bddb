mod test_properties;
mod test_scenario;
