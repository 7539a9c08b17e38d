use lakai_scrape::config::{CategoryEntry, Config, OutputConfig};
use lakai_scrape::output::read_rows;
use lakai_scrape::pipeline::{run, Stages};
use lakai_scrape::Category;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) TestBrowser/1.0";

/// Creates a test configuration writing into `dir`
fn create_test_config(dir: &Path, categories: Vec<(Category, String)>) -> Config {
    Config {
        user_agent: TEST_USER_AGENT.to_string(),
        output: OutputConfig {
            csv_path: dir.join("products.csv").display().to_string(),
            image_dir: dir.join("product_images").display().to_string(),
        },
        categories: categories
            .into_iter()
            .map(|(name, url)| CategoryEntry { name, url })
            .collect(),
    }
}

fn listing_page(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a class="flex flex-col gap-2" href="{}">item</a>"#, href))
        .collect();
    format!(
        r#"<html><body><nav><a href="/pages/about">About</a></nav>{}</body></html>"#,
        anchors
    )
}

fn detail_page(name: &str, images: &[&str]) -> String {
    let imgs: String = images
        .iter()
        .map(|src| format!(r#"<img class="w-full object-fit" src="{}">"#, src))
        .collect();
    format!(
        r#"<html><body>
        <div id="name-price"><h1>{}</h1><h1>$65.00</h1></div>
        <div id="selected-variant"><span>Color:</span><span>Black</span></div>
        <div id="desktop-image-gallery">{}</div>
        <div id="accordion_piece_yqU6pQ_content"><p>Suede upper.</p><p>Cupsole.</p></div>
        </body></html>"#,
        name, imgs
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_image(server: &MockServer, route: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(bytes.to_vec())
                .insert_header("content-type", "image/jpeg"),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_one_good_product_one_unreachable() {
    let server = MockServer::start().await;
    let base = server.uri();
    let tmp = TempDir::new().unwrap();

    mount_html(
        &server,
        "/collections/shoes",
        listing_page(&[
            "/products/telford-low?variantId=null",
            "/products/broken?variantId=null",
        ]),
    )
    .await;
    mount_html(
        &server,
        "/products/telford-low",
        detail_page("Telford Low", &["/cdn/telford_a.jpg", "/cdn/telford_b.jpg"]),
    )
    .await;
    mount_status(&server, "/products/broken", 500).await;
    mount_image(&server, "/cdn/telford_a.jpg", b"jpeg-a").await;
    mount_image(&server, "/cdn/telford_b.jpg", b"jpeg-b").await;

    let config = create_test_config(
        tmp.path(),
        vec![(Category::Shoes, format!("{}/collections/shoes", base))],
    );
    let summary = run(&config, Stages::All).await.expect("pipeline failed");

    assert_eq!(summary.products, 1);

    let rows: Vec<_> = read_rows(Path::new(&config.output.csv_path))
        .unwrap()
        .into_iter()
        .map(|row| row.unwrap())
        .collect();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.category, Category::Shoes);
    assert_eq!(row.name, "Telford Low");
    assert_eq!(row.price, "$65.00");
    assert_eq!(row.color, "Black");
    assert_eq!(row.description, "Suede upper. Cupsole.");
    assert_eq!(row.unique_name, "telford-low");
    assert_eq!(
        row.product_url,
        format!("{}/products/telford-low?variantId=null", base)
    );
    assert_eq!(
        row.image_urls(),
        vec![
            format!("{}/cdn/telford_a.jpg", base),
            format!("{}/cdn/telford_b.jpg", base),
        ]
    );

    let shoes_dir = tmp.path().join("product_images").join("shoes");
    assert_eq!(std::fs::read_dir(&shoes_dir).unwrap().count(), 2);
    assert_eq!(
        std::fs::read(shoes_dir.join("telford-low_1.jpg")).unwrap(),
        b"jpeg-a"
    );
    assert_eq!(
        std::fs::read(shoes_dir.join("telford-low_2.jpg")).unwrap(),
        b"jpeg-b"
    );

    let images = summary.images.unwrap();
    assert_eq!(images.downloaded, 2);
    assert_eq!(images.failed, 0);
}

#[tokio::test]
async fn test_no_products_writes_nothing() {
    let server = MockServer::start().await;
    let base = server.uri();
    let tmp = TempDir::new().unwrap();

    mount_status(&server, "/collections/shoes", 404).await;
    // listing loads, but every product page is gone
    mount_html(
        &server,
        "/collections/apparel",
        listing_page(&["/products/ghost"]),
    )
    .await;
    mount_status(&server, "/products/ghost", 404).await;

    let config = create_test_config(
        tmp.path(),
        vec![
            (Category::Shoes, format!("{}/collections/shoes", base)),
            (Category::Apparel, format!("{}/collections/apparel", base)),
        ],
    );
    let summary = run(&config, Stages::All).await.expect("pipeline failed");

    assert_eq!(summary.products, 0);
    assert!(summary.images.is_none());
    assert!(!Path::new(&config.output.csv_path).exists());
    assert!(!Path::new(&config.output.image_dir).exists());
}

#[tokio::test]
async fn test_incomplete_product_is_dropped_and_walk_continues() {
    let server = MockServer::start().await;
    let base = server.uri();
    let tmp = TempDir::new().unwrap();

    mount_html(
        &server,
        "/collections/apparel",
        listing_page(&["/products/first", "/products/no-gallery", "/products/last"]),
    )
    .await;
    mount_html(&server, "/products/first", detail_page("First Tee", &[])).await;
    mount_html(
        &server,
        "/products/no-gallery",
        detail_page("Broken", &[]).replace("desktop-image-gallery", "mobile-gallery"),
    )
    .await;
    mount_html(&server, "/products/last", detail_page("Last Tee", &[])).await;

    let config = create_test_config(
        tmp.path(),
        vec![(Category::Apparel, format!("{}/collections/apparel", base))],
    );
    let summary = run(&config, Stages::SkipImages)
        .await
        .expect("pipeline failed");

    assert_eq!(summary.products, 2);
    assert!(summary.images.is_none());

    let names: Vec<String> = read_rows(Path::new(&config.output.csv_path))
        .unwrap()
        .into_iter()
        .map(|row| row.unwrap().name)
        .collect();
    assert_eq!(names, vec!["First Tee".to_string(), "Last Tee".to_string()]);
    assert!(!Path::new(&config.output.image_dir).exists());
}

#[tokio::test]
async fn test_failed_image_keeps_later_indices() {
    let server = MockServer::start().await;
    let base = server.uri();
    let tmp = TempDir::new().unwrap();

    mount_html(
        &server,
        "/collections/shoes",
        listing_page(&["/products/flaco"]),
    )
    .await;
    mount_html(
        &server,
        "/products/flaco",
        detail_page("Flaco", &["/cdn/1.jpg", "/cdn/2.jpg", "/cdn/3.jpg"]),
    )
    .await;
    mount_image(&server, "/cdn/1.jpg", b"one").await;
    mount_status(&server, "/cdn/2.jpg", 404).await;
    mount_image(&server, "/cdn/3.jpg", b"three").await;

    let config = create_test_config(
        tmp.path(),
        vec![(Category::Shoes, format!("{}/collections/shoes", base))],
    );
    let summary = run(&config, Stages::All).await.expect("pipeline failed");

    let shoes_dir = tmp.path().join("product_images").join("shoes");
    assert!(shoes_dir.join("flaco_1.jpg").exists());
    assert!(!shoes_dir.join("flaco_2.jpg").exists());
    assert_eq!(std::fs::read(shoes_dir.join("flaco_3.jpg")).unwrap(), b"three");

    let images = summary.images.unwrap();
    assert_eq!(images.rows, 1);
    assert_eq!(images.downloaded, 2);
    assert_eq!(images.failed, 1);
}

#[tokio::test]
async fn test_images_only_rereads_csv() {
    let server = MockServer::start().await;
    let base = server.uri();
    let tmp = TempDir::new().unwrap();

    mount_image(&server, "/cdn/hoodie.jpg", b"hoodie").await;

    let config = create_test_config(tmp.path(), vec![]);
    std::fs::write(
        &config.output.csv_path,
        format!(
            "Category,Name,Color,Price,Image URLs,Description,Product URL,Unique Name\n\
             apparel,Hoodie,Grey,$70.00,{base}/cdn/hoodie.jpg,Fleece,{base}/products/hoodie,hoodie\n\
             apparel,Socks,White,$12.00,,Cotton,{base}/products/socks,socks\n",
            base = base
        ),
    )
    .unwrap();

    let summary = run(&config, Stages::ImagesOnly)
        .await
        .expect("pipeline failed");

    assert_eq!(summary.products, 0);
    let apparel_dir = tmp.path().join("product_images").join("apparel");
    assert_eq!(std::fs::read(apparel_dir.join("hoodie_1.jpg")).unwrap(), b"hoodie");
    assert_eq!(std::fs::read_dir(&apparel_dir).unwrap().count(), 1);
    assert_eq!(summary.images.unwrap().rows, 2);
}

#[tokio::test]
async fn test_images_only_without_csv_fails() {
    let tmp = TempDir::new().unwrap();
    let config = create_test_config(tmp.path(), vec![]);

    assert!(run(&config, Stages::ImagesOnly).await.is_err());
}

#[tokio::test]
async fn test_categories_in_order_with_configured_user_agent() {
    let server = MockServer::start().await;
    let base = server.uri();
    let tmp = TempDir::new().unwrap();

    // listing requests must carry the configured User-Agent
    Mock::given(method("GET"))
        .and(path("/collections/apparel"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&["/products/tee"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/shoes"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&["/products/mj-low", "/products/owen"])),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_html(&server, "/products/tee", detail_page("Tee", &[])).await;
    mount_html(&server, "/products/mj-low", detail_page("MJ Low", &[])).await;
    mount_html(&server, "/products/owen", detail_page("Owen", &[])).await;

    let config = create_test_config(
        tmp.path(),
        vec![
            (Category::Apparel, format!("{}/collections/apparel", base)),
            (Category::Shoes, format!("{}/collections/shoes", base)),
        ],
    );
    run(&config, Stages::SkipImages)
        .await
        .expect("pipeline failed");

    let rows: Vec<_> = read_rows(Path::new(&config.output.csv_path))
        .unwrap()
        .into_iter()
        .map(|row| row.unwrap())
        .map(|row| (row.category, row.unique_name))
        .collect();
    assert_eq!(
        rows,
        vec![
            (Category::Apparel, "tee".to_string()),
            (Category::Shoes, "mj-low".to_string()),
            (Category::Shoes, "owen".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_unreachable_listing_skips_only_that_category() {
    let server = MockServer::start().await;
    let base = server.uri();
    let tmp = TempDir::new().unwrap();

    mount_html(
        &server,
        "/collections/apparel",
        listing_page(&["/products/pocket-tee"]),
    )
    .await;
    mount_html(&server, "/products/pocket-tee", detail_page("Pocket Tee", &[])).await;

    // nothing listens on port 1, so the shoes listing fails at the socket level
    let config = create_test_config(
        tmp.path(),
        vec![
            (
                Category::Shoes,
                "http://127.0.0.1:1/collections/shoes".to_string(),
            ),
            (Category::Apparel, format!("{}/collections/apparel", base)),
        ],
    );
    let summary = run(&config, Stages::SkipImages)
        .await
        .expect("pipeline failed");

    assert_eq!(summary.products, 1);

    let rows: Vec<_> = read_rows(Path::new(&config.output.csv_path))
        .unwrap()
        .into_iter()
        .map(|row| row.unwrap())
        .collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, Category::Apparel);
    assert_eq!(rows[0].unique_name, "pocket-tee");
}
