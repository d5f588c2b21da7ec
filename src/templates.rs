use maud::{DOCTYPE, Markup, html};

use crate::entities::{movie, user};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(users: &[user::Model]) -> String {
    page(
        "Movieshelf",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Movieshelf" }
                        p class="mt-2 text-gray-600" { "Pick a user to browse their favorite movies." }

                        @if users.is_empty() {
                            p class="mt-8 text-gray-500" { "No users yet. Add the first one below." }
                        } @else {
                            ul class="mt-8 divide-y divide-gray-200" {
                                @for user in users {
                                    li class="py-3 flex items-center justify-between" {
                                        a class="text-blue-600 hover:text-blue-800 font-medium" href=(format!("/users/{}/movies", user.id)) {
                                            (user.name)
                                        }
                                        span class="text-sm text-gray-500" { (user.email) }
                                    }
                                }
                            }
                        }

                        form class="mt-10 space-y-4 border-t border-gray-200 pt-6" method="post" action="/users" {
                            h2 class="text-lg font-semibold text-gray-900" { "Add a user" }
                            div {
                                label class="block text-sm font-medium text-gray-700" for="name" { "Name" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="name" id="name" required;
                            }
                            div {
                                label class="block text-sm font-medium text-gray-700" for="email" { "Email" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" type="email" name="email" id="email" required;
                            }
                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Add user" }
                        }
                    }
                }
            }
        },
    )
}

pub fn movies_page(user: &user::Model, movies: &[movie::Model]) -> String {
    page(
        &format!("{} · Movieshelf", user.name),
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-10" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { (user.name) "'s movies" }
                            p class="mt-2 text-gray-600" { (user.email) }
                        }
                        a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "All users" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No favorite movies yet." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(user, movie))
                            }
                        }
                    }

                    form class="mt-10 bg-white shadow rounded-lg p-6 space-y-4" method="post" action=(format!("/users/{}/movies", user.id)) {
                        h2 class="text-lg font-semibold text-gray-900" { "Add a movie" }
                        p class="text-sm text-gray-500" { "Details are filled in from OMDb." }
                        div class="grid gap-4 md:grid-cols-2" {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="title" { "Title" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="title" id="title" required;
                            }
                            div {
                                label class="block text-sm font-medium text-gray-700" for="year" { "Year (optional)" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="year" id="year" inputmode="numeric" pattern="[0-9]*";
                            }
                        }
                        button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Add movie" }
                    }
                }
            }
        },
    )
}

pub fn lookup_failed_page(user: &user::Model, message: &str) -> String {
    page(
        "Lookup failed",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Could not add that movie" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href=(format!("/users/{}/movies", user.id)) {
                            "Back to " (user.name) "'s movies"
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

pub fn not_found_page() -> String {
    page(
        "Not found",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8 text-center" {
                        h1 class="text-5xl font-bold text-gray-900" { "404" }
                        p class="mt-4 text-gray-700" { "That page does not exist." }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back to the user list" }
                    }
                }
            }
        },
    )
}

fn movie_card(user: &user::Model, movie: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start gap-6" {
                img class="h-36 w-24 rounded object-cover bg-gray-100" src=(movie.poster) alt=(format!("{} poster", movie.title));
                div class="flex-1" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        (movie.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                    }
                    p class="mt-1 text-sm text-gray-600" { "Directed by " (movie.director) }
                    p class="mt-1 text-sm text-gray-500" { (movie.genre) }

                    div class="mt-4 flex flex-wrap items-center gap-3" {
                        form class="flex items-center gap-2" method="post" action=(format!("/users/{}/movies/{}/update", user.id, movie.id)) {
                            input class="rounded-md border border-gray-300 px-2 py-1 text-sm" name="title" value=(movie.title);
                            button class="rounded-md bg-gray-800 px-3 py-1 text-sm font-medium text-white hover:bg-gray-900" type="submit" { "Rename" }
                        }
                        form method="post" action=(format!("/users/{}/movies/{}/delete", user.id, movie.id)) {
                            button class="rounded-md bg-red-600 px-3 py-1 text-sm font-medium text-white hover:bg-red-700" type="submit" { "Delete" }
                        }
                    }
                }
            }
        }
    }
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}
