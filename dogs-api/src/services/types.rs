pub type DogsParams = kennel_axum::params::RestParams;
