mod common;
mod routing;
mod runner;
