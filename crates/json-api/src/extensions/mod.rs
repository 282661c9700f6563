pub(crate) mod depot;
