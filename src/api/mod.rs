use rocket::Route;

mod create;
mod home;
mod participate;
mod vote;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(home::routes());
    routes.extend(create::routes());
    routes.extend(participate::routes());
    routes.extend(vote::routes());
    routes
}
