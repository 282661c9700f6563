pub(crate) mod middleware;
