pub mod stub_model;
pub mod latex_tools_tests;
pub mod image_ref_tests;
pub mod model_output_tests;
