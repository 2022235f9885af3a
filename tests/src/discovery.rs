mod fakes;
mod integration;
mod system;
