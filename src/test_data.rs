#[cfg(test)]
pub const CATALOG_DATA: &str = r##"
categories = ["Wildlife", "Travel Tips", "Conservation", "Photography", "Guides", "Destinations", "Other"]

[[posts]]
id = 1
title = "Lions of the Serengeti"
excerpt = "Following two prides through the short grass plains."
content = "The Serengeti holds one of the densest lion populations in Africa."
category = "Wildlife"
tags = ["big cats", "Serengeti"]
author = "Amani Njoroge"
publishDate = "2024-03-04"
readTime = "6 min read"
featured = true
featuredImage = "/public/images/lions.jpg"

[[posts]]
id = 2
title = "Packing for Your First Safari"
excerpt = "Neutral colours, layers and a good pair of binoculars."
content = "Soft bags fit light aircraft better than suitcases."
category = "Travel Tips"
tags = "packing, gear"
author = "Zawadi Otieno"
publishDate = "2024-02-18"

[[posts]]
id = 3
title = "Protecting Rhinos in Laikipia"
excerpt = "How community rangers changed the odds."
content = "Rhino numbers in the conservancies have doubled in a decade."
category = "Conservation"
tags = ["rhino", "anti-poaching"]
authorName = "Peter Lekishon"
publishDate = "2024-01-30"
featured = true

[[posts]]
id = 4
title = "Golden Hour Photography on the Plains"
excerpt = "Low sun, long lenses and patience."
content = "Shoot with the light behind you and let the dust glow."
category = "Photography"
tags = ["camera", "light"]
author = "Amani Njoroge"
publishDate = "2023-12-11"

[[posts]]
id = 5
title = "Elephant Families of Amboseli"
excerpt = "Matriarchs leading their herds beneath Kilimanjaro."
content = "Amboseli elephants are among the most studied in the world."
category = "Wildlife"
tags = ["elephants", "Kilimanjaro"]
author = "Zawadi Otieno"
publishDate = "2023-11-20"
featured = true

[[posts]]
id = 6
title = "Choosing a Safari Guide"
excerpt = "What a great guide brings to a game drive."
content = "Ask about tracking experience and languages spoken."
category = "Guides"
tags = ["guides"]
author = "Peter Lekishon"
publishDate = "2023-10-02"

[[posts]]
id = 7
title = "Leopards After Dark"
excerpt = "Night drives reveal a different savanna."
content = "Leopards hunt mostly at night and rest in trees by day."
category = "Wildlife"
tags = ["big cats", "night drives"]
author = "Amani Njoroge"
publishDate = "2023-09-15"

[[posts]]
id = 8
title = "A Weekend in Zanzibar"
content = "Spice farms, Stone Town and white sand after the bush."
category = "Island Escapes"

[[destinations]]
id = 1
slug = "masai-mara"
name = "Masai Mara"
country = "Kenya"
region = "East Africa"
summary = "Home of the Great Migration river crossings."
description = "The **Mara** is best between July and October."
highlights = ["Great Migration", "Big Five", "Hot air balloon safaris"]
bestTime = "July to October"
lodges = [101]

[[destinations]]
id = 2
name = "Serengeti"
country = "Tanzania"
region = "East Africa"
summary = "Endless plains and the calving season."
description = "Vast grasslands in northern Tanzania."
image = "/public/images/serengeti.jpg"
highlights = ["Calving season", "Lion prides"]
bestTime = "December to March"
lodges = [201]

[[destinations]]
id = 3
name = "Okavango Delta"
country = "Botswana"
region = "Southern Africa"
summary = "Mokoro trips through an inland delta."

[[lodges]]
id = 101
name = "Mara River Camp"
destination = 1
location = "Mara Triangle"
description = "Tented camp on the banks of the Mara river."
amenities = ["Pool", "Wi-Fi", "Game drives"]
priceFrom = 450
rating = 4.7

[[lodges]]
id = 102
name = "Governors' Camp"
destination = 1
location = "Musiara Marsh"
description = "Classic camp in the heart of the reserve."
amenities = "Bush breakfast, Balloon flights"

[[lodges]]
id = 201
name = "Serengeti Under Canvas"
destination = 2
location = "Central Serengeti"
priceFrom = 600

[[lodges]]
id = 301
name = "Tarangire Treetops"
location = "Tarangire"

[[reviews]]
author = "Claire M."
rating = 5
trip = "Masai Mara, 5 nights"
text = "We saw a river crossing on our second morning."
date = "2024-08-12"

[[reviews]]
author = "Tom B."
rating = 4
text = "Great guides, bumpy roads."

[[reviews]]
author = "Spam Bot"
rating = 9
text = "Best deals here"

[[reviews]]
author = "Aiko S."
rating = 5
trip = "Serengeti calving season"
text = "Unforgettable."
"##;

/// Minimal HTTP provider answering every request with the same response.
/// Request lines are kept so tests can tell what was asked and how often.
#[cfg(test)]
pub struct TestProvider {
    port: u16,
    requests: std::sync::mpsc::Receiver<String>,
}

#[cfg(test)]
impl TestProvider {
    pub fn start(status: &str, body: &str) -> Self {
        use std::io::{BufRead, BufReader, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status, body.len(), body,
        );
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                // Skip the headers, a GET has no body
                let mut line = String::new();
                while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) && line != "\r\n" {
                    line.clear();
                }
                let _ = tx.send(request_line.trim_end().to_string());
                let _ = stream.write_all(response.as_bytes());
            }
        });

        TestProvider { port, requests: rx }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.try_iter().collect()
    }
}
