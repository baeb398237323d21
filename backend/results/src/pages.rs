pub const INDEX: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Results</title>
  </head>
  <body>
    <h1>Results</h1>
    <ul id="results"></ul>
    <p id="error" hidden></p>
    <script>
      const list = document.getElementById("results");
      const error = document.getElementById("error");

      async function refresh() {
        try {
          const response = await fetch("/results");
          const body = await response.json();

          if (!response.ok) {
            throw new Error(body.error);
          }

          list.replaceChildren(
            ...Object.entries(body).map(([category, count]) => {
              const item = document.createElement("li");
              item.textContent = `${category}: ${count}`;
              return item;
            }),
          );
          error.hidden = true;
        } catch (e) {
          error.textContent = `Results unavailable: ${e.message}`;
          error.hidden = false;
        }
      }

      refresh();
      setInterval(refresh, 2000);
    </script>
  </body>
</html>
"#;
