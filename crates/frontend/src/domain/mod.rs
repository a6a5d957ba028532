pub mod a001_kra;
pub mod a002_kra_template;
pub mod a003_department;
pub mod a004_goal;
pub mod a005_review;
