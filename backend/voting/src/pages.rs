use tally::Counts;

pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

pub fn index(counts: &Counts) -> String {
    let rows: String = counts
        .iter()
        .map(|(category, count)| {
            let category = escape(category);

            format!(
                r#"
      <li>
        <form method="post" action="/vote">
          <input type="hidden" name="choice" value="{category}">
          <button type="submit">{category}</button>
          <span class="count">{count}</span>
        </form>
      </li>"#
            )
        })
        .collect();

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Vote</title>
  </head>
  <body>
    <h1>Cast your vote</h1>
    <ul>{rows}
    </ul>
    <p>Total votes: {total}</p>
    <script>
      for (const form of document.querySelectorAll("form")) {{
        form.addEventListener("submit", async (event) => {{
          event.preventDefault();
          await fetch("/vote", {{ method: "POST", body: new URLSearchParams(new FormData(form)) }});
          location.reload();
        }});
      }}
    </script>
  </body>
</html>
"#,
        total = counts.total()
    )
}
