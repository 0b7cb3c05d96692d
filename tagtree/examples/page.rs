use tagtree::{builder::Builder, bumpalo::Bump, Document};

/// Splice a document's head tags, title and children into a full page.
fn assemble<'bump>(b: Builder<'bump>, content: &Document<'bump>) -> Document<'bump> {
    let head = b
        .head([])
        .add(content.title().map(|t| b.title([]).add(t)))
        .add(content.head_tags().to_vec());
    let body = b.body([]).add(content.children().to_vec());
    b.document_with_doctype(b.html([b.attr(("lang", "en"))]).add((head, body)))
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let bump = Bump::new();
    let b = Builder::new(&bump);

    let posts = ["First post", "Second post", "Third post"];
    let show_footer = posts.len() > 2;

    let mut content = b.document().with_title("Blog").add((
        b.h1([]).add("Blog"),
        b.ul([b.attr(("cls", "posts"))])
            .add(b.sequence(posts.iter().enumerate().map(|(i, title)| {
                let href = format!("/posts/{i}");
                b.li([]).add(b.a([b.attr(("href", href))]).add(*title))
            }))),
    ));
    content = content.add_if(
        show_footer,
        b.div([b.attr(("cls", "footer"))]).add(("Showing ", posts.len(), " posts")),
    );
    content
        .add_head_tag(b.meta([b.attr(("charset", "utf-8"))]))
        .add_head_tags([b.css("/site.css", []), b.js("/site.js", [])]);

    let page = assemble(b, &content);
    page.write(&mut std::io::stdout())
}
