use anyhow::{Result, anyhow};
use reqwest::Url;

/// Opens a URL outside the client, e.g. in a new browser tab.
pub trait UrlOpener: Send {
    fn open(&mut self, url: &str) -> Result<()>;
}

/// Parse `url` and accept only web pages. Server-supplied URLs never reach the
/// system browser with any other scheme.
pub fn web_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| anyhow!("Invalid URL {:?}: {}", url, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(anyhow!("Refusing to open {} URL: {}", scheme, url)),
    }
}

/// Opens web pages in the default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        let url = web_url(url)?;
        webbrowser::open(url.as_str()).map_err(|e| anyhow!("Could not open {}: {}", url, e))
    }
}

/// Ignores every URL. For front ends without a browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOpener;

impl UrlOpener for NoopOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        tracing::debug!("Not opening {} (no opener configured)", url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_url_accepts_translate_links() {
        let url = web_url("https://translate.google.com/?sl=auto&tl=ti&text=hello%20world&op=translate").unwrap();
        assert_eq!(url.query_pairs().count(), 4);
        assert!(web_url("http://localhost:5000/page").is_ok());
    }

    #[test]
    fn test_web_url_rejects_other_schemes() {
        for url in ["file:///etc/passwd", "javascript:alert(1)", "ftp://example.com/x", "/etc/passwd", "calc.exe"] {
            assert!(web_url(url).is_err(), "accepted {}", url);
        }
    }

    #[test]
    fn test_system_opener_refuses_local_files() {
        let err = SystemOpener.open("file:///etc/passwd").unwrap_err();
        assert!(err.to_string().contains("Refusing to open file URL"));
    }
}
