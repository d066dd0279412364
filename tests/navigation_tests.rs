use pixstyle::navigation::{NavigationStack, Navigator, Route};

fn gallery() -> Route {
    Route::Gallery {
        category: "professional".into(),
    }
}

#[test]
fn push_then_back_returns_to_gallery() {
    let mut stack = NavigationStack::new(gallery());
    stack.push(Route::UploadImage {
        value: "studio-portrait".into(),
    });
    assert_eq!(stack.depth(), 2);
    assert!(stack.back());
    assert_eq!(stack.current(), Some(&gallery()));
}

#[test]
fn replace_swaps_only_the_top() {
    let mut stack = NavigationStack::new(gallery());
    stack.push(Route::Register);
    stack.replace(Route::SignIn);
    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.current(), Some(&Route::SignIn));
    stack.back();
    assert_eq!(stack.current(), Some(&gallery()));
}

#[test]
fn replace_on_empty_stack_pushes() {
    let mut stack = NavigationStack::new(Route::Register);
    stack.back();
    stack.replace(Route::SignIn);
    assert_eq!(stack.depth(), 1);
}

#[test]
fn route_display_paths() {
    assert_eq!(gallery().to_string(), "/gallery/professional");
    assert_eq!(Route::Register.to_string(), "/auth/register");
}
