//! HTML form pages

use maud::{html, Markup, DOCTYPE};

use crate::models::{Author, Book, Borrower};

fn layout(title: &str, notice: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " - Library" }
            }
            body {
                nav {
                    a href="/authors" { "Authors" } " | "
                    a href="/books" { "Books" } " | "
                    a href="/borrowers" { "Borrowers" } " | "
                    a href="/transactions" { "Transactions" }
                }
                h1 { (title) }
                @if let Some(notice) = notice {
                    p class="notice" { (notice) }
                }
                (content)
            }
        }
    }
}

pub fn authors_page(notice: Option<&str>) -> Markup {
    layout(
        "Authors",
        notice,
        html! {
            form method="post" action="/authors" {
                label { "Name " input name="name" required; }
                label { "Email " input name="email" type="email" required; }
                label { "Date of birth " input name="date_of_birth" type="date" required; }
                button type="submit" { "Add author" }
            }
        },
    )
}

pub fn books_page(authors: &[Author], notice: Option<&str>) -> Markup {
    layout(
        "Books",
        notice,
        html! {
            form method="post" action="/books" {
                label { "Title " input name="title" required; }
                label {
                    "Author "
                    select name="author_id" required {
                        @for author in authors {
                            option value=(author.id) { (author.name) }
                        }
                    }
                }
                label { "Published " input name="published_date" type="date" required; }
                label { "ISBN " input name="isbn" required; }
                label { "Quantity " input name="quantity" type="number" min="0" required; }
                label { "Available copies " input name="available_copies" type="number" min="0" required; }
                button type="submit" { "Add book" }
            }
        },
    )
}

pub fn borrowers_page(notice: Option<&str>) -> Markup {
    layout(
        "Borrowers",
        notice,
        html! {
            form method="post" action="/borrowers" {
                label { "Name " input name="name" required; }
                label { "Email " input name="email" type="email" required; }
                label { "Phone " input name="phone_number" required; }
                label { "Member since " input name="membership_date" type="date"; }
                button type="submit" { "Add borrower" }
            }
        },
    )
}

pub fn transactions_page(books: &[Book], borrowers: &[Borrower], notice: Option<&str>) -> Markup {
    layout(
        "Transactions",
        notice,
        html! {
            form method="post" action="/transactions" {
                label {
                    "Book "
                    select name="book_id" required {
                        @for book in books {
                            option value=(book.id) { (book.title) " (" (book.isbn) ")" }
                        }
                    }
                }
                label {
                    "Borrower "
                    select name="borrower_id" required {
                        @for borrower in borrowers {
                            option value=(borrower.id) { (borrower.name) " <" (borrower.email) ">" }
                        }
                    }
                }
                label {
                    "Type "
                    select name="transaction_type" {
                        option value="borrow" { "Borrow" }
                        option value="return" { "Return" }
                    }
                }
                label { "Date " input name="transaction_date" type="datetime-local"; }
                label { "Due " input name="due_date" type="date" required; }
                label { "Returned " input name="return_date" type="datetime-local"; }
                button type="submit" { "Record transaction" }
            }
        },
    )
}
