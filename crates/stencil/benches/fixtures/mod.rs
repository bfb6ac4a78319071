macro_rules! input {
    ($name: literal) => {
        ($name, include_str!(concat!("./", $name)))
    };
}

pub const FIXTURES: [(&str, &str); 3] = [
    input!("greeting.html"),
    input!("table.html"),
    input!("todo_app.html"),
];
