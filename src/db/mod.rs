pub mod calculation_queries;
