use serde_json::Value;

pub fn render_index(count: u64, external_form_url: Option<&str>) -> String {
    let (button, url) = match external_form_url {
        Some(url) => (EXTERNAL_BUTTON_HTML, script_literal(url)),
        None => ("", "null".to_string()),
    };
    INDEX_HTML
        .replace("{{COUNT}}", &count.to_string())
        .replace("{{EXTERNAL_BUTTON}}", button)
        .replace("{{EXTERNAL_URL}}", &url)
}

/// JSON string literal that is safe to embed inside a `<script>` element.
fn script_literal(value: &str) -> String {
    Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

const EXTERNAL_BUTTON_HTML: &str =
    r#"<button class="btn-external" id="externalFormButton" type="button">Open the full form</button>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Registration</title>
  <style>
    :root {
      --ink: #22313f;
      --muted: #66727d;
      --accent: #1f8a70;
      --accent-2: #3d5a80;
      --card: #ffffff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      display: grid;
      place-items: center;
      padding: 24px 16px;
      background: linear-gradient(160deg, #eef5f1, #dfe9f3);
      color: var(--ink);
      font-family: "Helvetica Neue", Arial, sans-serif;
    }

    .app {
      width: min(560px, 100%);
      display: grid;
      gap: 20px;
      padding: 32px;
      background: var(--card);
      border-radius: 20px;
      box-shadow: 0 16px 40px rgba(34, 49, 63, 0.12);
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    input[type="email"] {
      flex: 1 1 220px;
      padding: 12px 18px;
      border: 1px solid #c9d3dc;
      border-radius: 999px;
      font: inherit;
    }

    button {
      padding: 12px 20px;
      border: none;
      border-radius: 999px;
      font: inherit;
      font-weight: 600;
      color: white;
      cursor: pointer;
    }

    .btn-register {
      background: var(--accent);
    }

    .btn-external {
      background: var(--accent-2);
    }

    .status {
      min-height: 1.2em;
      color: var(--accent);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Stay in the loop</h1>
      <p class="subtitle">Leave your email and we will let you know when we launch.</p>
    </header>

    <section class="stat">
      <span class="label">Registrations</span>
      <span id="registeredCount" class="value">{{COUNT}}</span>
    </section>

    <form id="emailForm">
      <input id="emailInput" type="email" name="email" placeholder="you@example.com" autocomplete="email" />
      <button class="btn-register" id="submitButton" type="submit">Register</button>
    </form>

    <div class="status" id="THISmessage"></div>

    <section>
      {{EXTERNAL_BUTTON}}
    </section>
  </main>

  <script>
    const emailForm = document.getElementById('emailForm');
    const emailInput = document.getElementById('emailInput');
    const messageEl = document.getElementById('THISmessage');
    const countEl = document.getElementById('registeredCount');
    const externalButton = document.getElementById('externalFormButton');
    const externalFormUrl = {{EXTERNAL_URL}};

    const CONFIRMATION = 'Thanks for registration!';
    const CLEAR_AFTER_MS = 5000;
    let clearTimer = null;

    const showConfirmation = () => {
      messageEl.textContent = CONFIRMATION;
      if (clearTimer !== null) {
        clearTimeout(clearTimer);
      }
      clearTimer = setTimeout(() => {
        messageEl.textContent = '';
        clearTimer = null;
      }, CLEAR_AFTER_MS);
    };

    const increment = async (email) => {
      const res = await fetch('/api/increment-count', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ email })
      });
      if (!res.ok) {
        throw new Error('Network response was not ok');
      }
      const data = await res.json();
      console.log('New registration count:', data.newCount);
      countEl.textContent = data.newCount;
    };

    const loadCount = async () => {
      const res = await fetch('/api/get-count');
      if (!res.ok) {
        throw new Error('Unable to load count');
      }
      const data = await res.json();
      countEl.textContent = data.count;
    };

    emailForm.addEventListener('submit', (event) => {
      event.preventDefault();
      const email = emailInput.value;
      emailInput.value = '';
      increment(email).catch((err) => console.error('There was a problem with the fetch operation:', err));
      showConfirmation();
    });

    if (externalButton && externalFormUrl) {
      externalButton.addEventListener('click', () => {
        window.open(externalFormUrl, '_blank', 'noopener,noreferrer');
      });
    }

    loadCount().catch((err) => console.error(err));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_carries_form_contract() {
        let html = render_index(12, None);
        for id in ["emailForm", "emailInput", "THISmessage", "registeredCount"] {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing #{id}");
        }
        assert!(html.contains(">12</span>"));
        assert!(html.contains("/api/increment-count"));
        assert!(html.contains("Thanks for registration!"));
        assert!(!html.contains("externalFormButton\""));
        assert!(html.contains("const externalFormUrl = null;"));
        assert!(html.contains(r#"<div class="status" id="THISmessage"></div>"#));
        assert!(!html.contains("data-type"));
    }

    #[test]
    fn external_button_opens_isolated_window() {
        let html = render_index(0, Some("https://forms.example.org/a?b=1"));
        assert!(html.contains("id=\"externalFormButton\""));
        assert!(html.contains(r#"const externalFormUrl = "https://forms.example.org/a?b=1";"#));
        assert!(html.contains("noopener,noreferrer"));
    }

    #[test]
    fn script_literal_cannot_close_the_script() {
        let literal = script_literal("https://x.test/</script><b>");
        assert!(!literal.contains("</script>"));
        assert_eq!(literal, r#""https://x.test/<\/script><b>""#);
    }
}
