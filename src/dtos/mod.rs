pub mod jobdtos;
pub mod profiledtos;
